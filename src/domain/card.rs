use super::card_number::CardNumber;
use super::network::CardNetwork;
use crate::error::{CardError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest limit that fits ten digits with two decimal places.
const MAX_LIMIT: Decimal = dec!(99999999.99);

/// Minimum length of a trimmed rejection reason.
pub const MIN_REJECTION_REASON: usize = 10;

/// A credit limit: strictly positive, at most two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CreditLimit(Decimal);

impl CreditLimit {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(CardError::Validation(
                "Credit limit must be positive".to_string(),
            ));
        }
        if value.normalize().scale() > 2 {
            return Err(CardError::Validation(
                "Credit limit allows at most 2 decimal places".to_string(),
            ));
        }
        if value > MAX_LIMIT {
            return Err(CardError::Validation(format!(
                "Credit limit must not exceed {MAX_LIMIT}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for CreditLimit {
    type Error = CardError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CardStatus::Pending => "PENDING",
            CardStatus::Approved => "APPROVED",
            CardStatus::Rejected => "REJECTED",
        })
    }
}

/// A reviewer's verdict on a pending application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusDecision {
    Approve,
    Reject { reason: String },
}

/// A credit card application and, once created, its issued number.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CreditCard {
    pub id: u32,
    pub user: u32,
    pub network: CardNetwork,
    pub card_number: CardNumber,
    pub credit_limit: CreditLimit,
    pub status: CardStatus,
    pub approved_by: Option<u32>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreditCard {
    /// A new application in `PENDING` state.
    pub fn new(
        id: u32,
        user: u32,
        network: CardNetwork,
        card_number: CardNumber,
        credit_limit: CreditLimit,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user,
            network,
            card_number,
            credit_limit,
            status: CardStatus::Pending,
            approved_by: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a reviewer decision. Only pending applications can change.
    pub fn decide(&mut self, reviewer: u32, decision: StatusDecision) -> Result<()> {
        if self.status != CardStatus::Pending {
            return Err(CardError::InvalidTransition {
                id: self.id,
                current: self.status,
            });
        }

        match decision {
            StatusDecision::Approve => {
                self.status = CardStatus::Approved;
                self.approved_by = Some(reviewer);
                self.rejection_reason = None;
            }
            StatusDecision::Reject { reason } => {
                if reason.trim().chars().count() < MIN_REJECTION_REASON {
                    return Err(CardError::Validation(format!(
                        "Rejection reason must be at least {MIN_REJECTION_REASON} characters long"
                    )));
                }
                self.status = CardStatus::Rejected;
                self.approved_by = None;
                self.rejection_reason = Some(reason);
            }
        }
        self.touch();
        Ok(())
    }

    pub fn set_limit(&mut self, limit: CreditLimit) {
        self.credit_limit = limit;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
