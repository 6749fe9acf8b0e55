//! Card number generation and structural validation.
//!
//! A generated number is `prefix + account digits + check digit`. The account
//! digits come from a SHA-256 digest of a seed that mixes the wall clock (to
//! the microsecond) with a random four-digit salt. Only the decimal characters
//! of the hex digest are used, in order.
//!
//! Generation does not guarantee uniqueness. Callers persist the number under
//! a uniqueness constraint and call [`generate`] again on conflict.

use super::card_number::CardNumber;
use super::luhn;
use super::network::CardNetwork;
use super::ports::NumberSource;
use crate::error::{CardError, Result};
use chrono::Local;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Supplies the seed string that is hashed into account digits.
pub trait EntropySource: Send + Sync {
    fn seed(&self) -> String;
}

/// Local timestamp (year through microsecond) followed by a random salt in
/// `1000..=9999`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    fn seed(&self) -> String {
        let timestamp = Local::now().format("%Y%m%d%H%M%S%6f");
        let salt: u16 = rand::thread_rng().gen_range(1000..=9999);
        format!("{timestamp}{salt}")
    }
}

/// Stateless number generator over an [`EntropySource`].
#[derive(Debug, Default, Clone)]
pub struct CardNumberGenerator<E = SystemEntropy> {
    entropy: E,
}

impl CardNumberGenerator {
    /// A generator over [`SystemEntropy`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: EntropySource> CardNumberGenerator<E> {
    pub fn with_entropy(entropy: E) -> Self {
        Self { entropy }
    }

    /// Draws a fresh seed and derives a number for `network`.
    ///
    /// Fails only with [`CardError::EntropyUnderflow`], which is retryable.
    pub fn generate(&self, network: CardNetwork) -> Result<CardNumber> {
        derive(network, &self.entropy.seed())
    }
}

impl<E: EntropySource> NumberSource for CardNumberGenerator<E> {
    fn next_number(&self, network: CardNetwork) -> Result<CardNumber> {
        self.generate(network)
    }
}

/// Generates a number for `network` from system entropy.
pub fn generate(network: CardNetwork) -> Result<CardNumber> {
    CardNumberGenerator::new().generate(network)
}

/// Derives the number a given seed maps to. Deterministic.
pub fn derive(network: CardNetwork, seed: &str) -> Result<CardNumber> {
    assemble(network, &entropy_digits(seed))
}

/// Decimal characters of the lowercase hex SHA-256 of `seed`, in order.
pub fn entropy_digits(seed: &str) -> String {
    let digest = Sha256::digest(seed.as_bytes());
    digest
        .iter()
        .flat_map(|byte| [byte >> 4, byte & 0x0f])
        .filter(|nibble| *nibble < 10)
        .map(|nibble| char::from(b'0' + nibble))
        .collect()
}

fn assemble(network: CardNetwork, entropy: &str) -> Result<CardNumber> {
    let range = network.bin_range();
    let needed = range.length - range.prefix.len() - 1;
    if entropy.len() < needed {
        return Err(CardError::EntropyUnderflow {
            needed,
            available: entropy.len(),
        });
    }

    let mut partial = String::with_capacity(range.length);
    partial.push_str(range.prefix);
    partial.push_str(&entropy[..needed]);
    partial.truncate(range.length - 1);

    let check = luhn::compute_check_digit(&partial).ok_or_else(|| {
        CardError::InvalidCardNumber("entropy contained non-digit characters".to_string())
    })?;
    partial.push(char::from(b'0' + check));

    Ok(CardNumber::from_generated(partial))
}

/// Structural check of a stored or supplied number.
///
/// Non-digit input is invalid. With a network, the length must also match
/// that network's length. The prefix is not checked here.
pub fn validate(card_number: &str, network: Option<CardNetwork>) -> bool {
    if card_number.is_empty() || !card_number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if let Some(network) = network
        && card_number.len() != network.total_length()
    {
        return false;
    }
    luhn::is_valid(card_number)
}
