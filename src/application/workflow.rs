use super::command::Command;
use crate::config::EngineConfig;
use crate::domain::actor::Actor;
use crate::domain::card::{CreditCard, CreditLimit, StatusDecision};
use crate::domain::generator;
use crate::domain::network::CardNetwork;
use crate::domain::ports::{CardStoreBox, NumberSourceBox};
use crate::error::{CardError, Result};
use tracing::{debug, info, warn};

/// Drives credit card applications through their lifecycle.
///
/// `CardWorkflow` owns the store and the number source. Number generation
/// happens exactly once per application, inside [`CardWorkflow::apply`], and
/// is retried only on a storage uniqueness conflict or an entropy underflow.
pub struct CardWorkflow {
    store: CardStoreBox,
    numbers: NumberSourceBox,
    config: EngineConfig,
}

impl CardWorkflow {
    /// Creates a new `CardWorkflow`.
    ///
    /// # Arguments
    ///
    /// * `store` - Persistence for applications, enforcing number uniqueness.
    /// * `numbers` - Source of candidate card numbers.
    /// * `config` - Retry budget and network policy.
    pub fn new(store: CardStoreBox, numbers: NumberSourceBox, config: EngineConfig) -> Self {
        Self {
            store,
            numbers,
            config,
        }
    }

    /// Runs one command on behalf of `actor`.
    pub async fn execute(&self, actor: Actor, command: Command) -> Result<()> {
        match command {
            Command::Apply { id, network, limit } => {
                self.apply(actor, id, network, limit).await?;
            }
            Command::Decide { id, decision } => {
                self.decide(actor, id, decision).await?;
            }
            Command::UpdateLimit { id, limit } => {
                self.update_limit(actor, id, limit).await?;
            }
            Command::Delete { id } => self.delete(actor, id).await?,
        }
        Ok(())
    }

    /// Submits a new application for `actor` and issues its card number.
    pub async fn apply(
        &self,
        actor: Actor,
        id: u32,
        network: CardNetwork,
        limit: CreditLimit,
    ) -> Result<CreditCard> {
        let attempts = self.config.max_generation_attempts;
        for attempt in 1..=attempts {
            let card_number = match self.numbers.next_number(network) {
                Ok(number) => number,
                Err(e) if e.is_retryable() => {
                    warn!(id, %network, attempt, error = %e, "card number generation failed, retrying");
                    continue;
                }
                Err(e) => return Err(e),
            };
            debug!(id, %network, attempt, last_four = card_number.last_four(), "generated candidate card number");

            let card = CreditCard::new(id, actor.user, network, card_number, limit);
            match self.store.insert(card.clone()).await {
                Ok(()) => {
                    info!(id, user = actor.user, %network, "card application created");
                    return Ok(card);
                }
                Err(e) if e.is_retryable() => {
                    warn!(id, %network, attempt, error = %e, "card number collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }
        Err(CardError::GenerationExhausted { attempts })
    }

    /// Approves or rejects a pending application.
    pub async fn decide(
        &self,
        actor: Actor,
        id: u32,
        decision: StatusDecision,
    ) -> Result<CreditCard> {
        actor.require_reviewer("update application status")?;
        let reviewer = actor.user;
        let card = self
            .store
            .modify(
                id,
                Box::new(move |card: &mut CreditCard| card.decide(reviewer, decision)),
            )
            .await?
            .ok_or(CardError::NotFound(id))?;
        info!(id, reviewer = actor.user, status = %card.status, "card application reviewed");
        Ok(card)
    }

    /// Changes the credit limit of an application in any state.
    pub async fn update_limit(
        &self,
        actor: Actor,
        id: u32,
        limit: CreditLimit,
    ) -> Result<CreditCard> {
        actor.require_reviewer("update credit limits")?;
        let card = self
            .store
            .modify(
                id,
                Box::new(move |card: &mut CreditCard| {
                    card.set_limit(limit);
                    Ok(())
                }),
            )
            .await?
            .ok_or(CardError::NotFound(id))?;
        info!(id, reviewer = actor.user, limit = %limit.value(), "credit limit updated");
        Ok(card)
    }

    /// Fetches one application, hiding other users' applications from
    /// non-reviewers.
    pub async fn get(&self, actor: Actor, id: u32) -> Result<CreditCard> {
        match self.store.get(id).await? {
            Some(card) if actor.can_view(card.user) => Ok(card),
            _ => Err(CardError::NotFound(id)),
        }
    }

    /// Applications visible to `actor`, newest first.
    pub async fn list(&self, actor: Actor) -> Result<Vec<CreditCard>> {
        let mut cards: Vec<CreditCard> = self
            .store
            .get_all()
            .await?
            .into_iter()
            .filter(|card| actor.can_view(card.user))
            .collect();
        cards.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(cards)
    }

    pub async fn delete(&self, actor: Actor, id: u32) -> Result<()> {
        actor.require_admin("delete applications")?;
        if !self.store.delete(id).await? {
            return Err(CardError::NotFound(id));
        }
        info!(id, admin = actor.user, "card application deleted");
        Ok(())
    }

    /// Ids of stored applications whose card number fails validation.
    pub async fn audit(&self) -> Result<Vec<u32>> {
        let mut broken: Vec<u32> = self
            .store
            .get_all()
            .await?
            .into_iter()
            .filter(|card| !generator::validate(card.card_number.as_str(), Some(card.network)))
            .map(|card| card.id)
            .collect();
        broken.sort_unstable();
        Ok(broken)
    }
}
