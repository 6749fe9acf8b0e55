use crate::domain::card::{CreditLimit, StatusDecision};
use crate::domain::network::CardNetwork;

/// A single workflow request, already validated and typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Apply {
        id: u32,
        network: CardNetwork,
        limit: CreditLimit,
    },
    Decide {
        id: u32,
        decision: StatusDecision,
    },
    UpdateLimit {
        id: u32,
        limit: CreditLimit,
    },
    Delete {
        id: u32,
    },
}
