use crate::domain::card::CardStatus;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CardError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unrecognized card network: {0}")]
    #[diagnostic(
        code(card_issuer::invalid_network),
        help("use VISA, MASTERCARD or AMEX, or pass --lenient-networks")
    )]
    InvalidNetwork(String),
    #[error("Entropy underflow: needed {needed} digits, digest yielded {available}")]
    EntropyUnderflow { needed: usize, available: usize },
    #[error("Invalid card number: {0}")]
    InvalidCardNumber(String),
    #[error("Card number already issued (ending {0})")]
    DuplicateCardNumber(String),
    #[error("Application {0} already exists")]
    DuplicateApplication(u32),
    #[error("Application {0} not found")]
    NotFound(u32),
    #[error("Role {role} is not allowed to {action}")]
    PermissionDenied { role: String, action: &'static str },
    #[error("Only pending applications can be updated (application {id} is {current})")]
    InvalidTransition { id: u32, current: CardStatus },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("No storable card number after {attempts} attempts")]
    #[diagnostic(code(card_issuer::generation_exhausted))]
    GenerationExhausted { attempts: u32 },
}

impl CardError {
    /// Whether the workflow may retry generation with fresh entropy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CardError::EntropyUnderflow { .. } | CardError::DuplicateCardNumber(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(
            CardError::EntropyUnderflow {
                needed: 9,
                available: 3
            }
            .is_retryable()
        );
        assert!(CardError::DuplicateCardNumber("1234".to_string()).is_retryable());
        assert!(!CardError::DuplicateApplication(1).is_retryable());
        assert!(!CardError::InvalidNetwork("DISCOVER".to_string()).is_retryable());
    }

    #[test]
    fn test_transition_message() {
        let err = CardError::InvalidTransition {
            id: 7,
            current: CardStatus::Approved,
        };
        assert_eq!(
            err.to_string(),
            "Only pending applications can be updated (application 7 is APPROVED)"
        );
    }
}
