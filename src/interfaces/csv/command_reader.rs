use crate::application::command::Command;
use crate::domain::actor::{Actor, Role};
use crate::domain::card::{CreditLimit, StatusDecision};
use crate::domain::network::{CardNetwork, NetworkPolicy};
use crate::error::{CardError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Apply,
    Approve,
    Reject,
    Limit,
    Delete,
}

/// One row of a command file:
/// `type, id, actor, role, network, limit, reason`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub r#type: CommandType,
    pub id: u32,
    pub actor: u32,
    pub role: Role,
    pub network: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub limit: Option<Decimal>,
    pub reason: Option<String>,
}

impl CommandRecord {
    pub fn actor(&self) -> Actor {
        Actor::new(self.actor, self.role)
    }

    /// Validates the row into a typed command.
    pub fn into_command(self, policy: NetworkPolicy) -> Result<Command> {
        let id = self.id;
        let command = match self.r#type {
            CommandType::Apply => Command::Apply {
                id,
                network: CardNetwork::resolve(self.network.as_deref().unwrap_or_default(), policy)?,
                limit: required_limit(self.limit)?,
            },
            CommandType::Approve => Command::Decide {
                id,
                decision: StatusDecision::Approve,
            },
            CommandType::Reject => Command::Decide {
                id,
                decision: StatusDecision::Reject {
                    reason: self.reason.ok_or_else(|| {
                        CardError::Validation(
                            "Rejection reason is required when rejecting".to_string(),
                        )
                    })?,
                },
            },
            CommandType::Limit => Command::UpdateLimit {
                id,
                limit: required_limit(self.limit)?,
            },
            CommandType::Delete => Command::Delete { id },
        };
        Ok(command)
    }
}

fn required_limit(limit: Option<Decimal>) -> Result<CreditLimit> {
    limit
        .ok_or_else(|| CardError::Validation("Credit limit is required".to_string()))?
        .try_into()
}

/// Reads workflow commands from a CSV source.
///
/// Wraps `csv::Reader`, trimming whitespace and accepting short rows, so
/// trailing optional columns can be left off.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows. A malformed row yields an error and the
    /// iterator carries on with the next one.
    pub fn records(self) -> impl Iterator<Item = Result<CommandRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CardError::from))
    }
}
