//! Application layer orchestrating the card application workflow.
//!
//! [`workflow::CardWorkflow`] is the entry point: it owns the store and the
//! number source and retries generation when storage reports a collision.

pub mod command;
pub mod workflow;
