use crate::error::{CardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The card scheme an application is issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
}

/// Issuer prefix and total card-number length of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    pub prefix: &'static str,
    pub length: usize,
}

const VISA_RANGE: BinRange = BinRange {
    prefix: "400000",
    length: 16,
};
const MASTERCARD_RANGE: BinRange = BinRange {
    prefix: "510000",
    length: 16,
};
const AMEX_RANGE: BinRange = BinRange {
    prefix: "340000",
    length: 15,
};

/// How to treat network names that are not one of the known schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkPolicy {
    /// Unknown names fail with [`CardError::InvalidNetwork`].
    #[default]
    Strict,
    /// Unknown names are issued as VISA.
    FallbackToVisa,
}

impl CardNetwork {
    pub const ALL: [CardNetwork; 3] = [CardNetwork::Visa, CardNetwork::Mastercard, CardNetwork::Amex];

    pub const fn bin_range(self) -> BinRange {
        match self {
            CardNetwork::Visa => VISA_RANGE,
            CardNetwork::Mastercard => MASTERCARD_RANGE,
            CardNetwork::Amex => AMEX_RANGE,
        }
    }

    pub const fn prefix(self) -> &'static str {
        self.bin_range().prefix
    }

    pub const fn total_length(self) -> usize {
        self.bin_range().length
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CardNetwork::Visa => "VISA",
            CardNetwork::Mastercard => "MASTERCARD",
            CardNetwork::Amex => "AMEX",
        }
    }

    /// Resolves a user-supplied network name.
    ///
    /// A blank name means VISA regardless of policy. Anything else that is
    /// not a known scheme is handled according to `policy`.
    pub fn resolve(name: &str, policy: NetworkPolicy) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(CardNetwork::Visa);
        }
        match (name.parse::<CardNetwork>(), policy) {
            (Ok(network), _) => Ok(network),
            (Err(_), NetworkPolicy::FallbackToVisa) => {
                warn!(network = name, "unrecognized card network, issuing as VISA");
                Ok(CardNetwork::Visa)
            }
            (Err(e), NetworkPolicy::Strict) => Err(e),
        }
    }
}

impl FromStr for CardNetwork {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        CardNetwork::ALL
            .into_iter()
            .find(|network| network.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CardError::InvalidNetwork(s.to_string()))
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_table() {
        assert_eq!(CardNetwork::Visa.prefix(), "400000");
        assert_eq!(CardNetwork::Mastercard.prefix(), "510000");
        assert_eq!(CardNetwork::Amex.prefix(), "340000");
        assert_eq!(CardNetwork::Visa.total_length(), 16);
        assert_eq!(CardNetwork::Mastercard.total_length(), 16);
        assert_eq!(CardNetwork::Amex.total_length(), 15);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("visa".parse::<CardNetwork>().unwrap(), CardNetwork::Visa);
        assert_eq!(
            " MasterCard ".parse::<CardNetwork>().unwrap(),
            CardNetwork::Mastercard
        );
        assert_eq!("AMEX".parse::<CardNetwork>().unwrap(), CardNetwork::Amex);
        assert!(matches!(
            "DISCOVER".parse::<CardNetwork>(),
            Err(CardError::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_resolve_strict() {
        assert!(matches!(
            CardNetwork::resolve("DINERS", NetworkPolicy::Strict),
            Err(CardError::InvalidNetwork(name)) if name == "DINERS"
        ));
        assert_eq!(
            CardNetwork::resolve("amex", NetworkPolicy::Strict).unwrap(),
            CardNetwork::Amex
        );
    }

    #[test]
    fn test_resolve_fallback() {
        assert_eq!(
            CardNetwork::resolve("DINERS", NetworkPolicy::FallbackToVisa).unwrap(),
            CardNetwork::Visa
        );
        assert_eq!(
            CardNetwork::resolve("mastercard", NetworkPolicy::FallbackToVisa).unwrap(),
            CardNetwork::Mastercard
        );
    }

    #[test]
    fn test_blank_defaults_to_visa() {
        assert_eq!(
            CardNetwork::resolve("  ", NetworkPolicy::Strict).unwrap(),
            CardNetwork::Visa
        );
    }

    #[test]
    fn test_serde_uppercase() {
        let json = serde_json::to_string(&CardNetwork::Mastercard).unwrap();
        assert_eq!(json, "\"MASTERCARD\"");
        let network: CardNetwork = serde_json::from_str("\"AMEX\"").unwrap();
        assert_eq!(network, CardNetwork::Amex);
    }
}
