use super::generator;
use super::network::CardNetwork;
use crate::error::{CardError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A structurally valid card number.
///
/// Only produced by the generator or by [`CardNumber::parse`], so every value
/// has its network's length and prefix and a correct Luhn check digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardNumber(String);

impl CardNumber {
    /// Wraps a number the generator has already assembled.
    pub(crate) fn from_generated(digits: String) -> Self {
        Self(digits)
    }

    /// Parses an externally supplied number for `network`.
    pub fn parse(value: &str, network: CardNetwork) -> Result<Self> {
        if !generator::validate(value, Some(network)) {
            return Err(CardError::InvalidCardNumber(format!(
                "not a valid {network} number"
            )));
        }
        if !value.starts_with(network.prefix()) {
            return Err(CardError::InvalidCardNumber(format!(
                "missing {network} prefix {}",
                network.prefix()
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last four digits, the only part that is safe to log.
    pub fn last_four(&self) -> &str {
        &self.0[self.0.len().saturating_sub(4)..]
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CardNumber {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
