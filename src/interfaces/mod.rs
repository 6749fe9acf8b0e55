//! Batch file formats used by the command line.

pub mod csv;
