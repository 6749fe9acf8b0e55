//! Card numbers, networks and the application entity, plus the ports the
//! application layer depends on.

pub mod actor;
pub mod card;
pub mod card_number;
pub mod generator;
pub mod luhn;
pub mod network;
pub mod ports;
