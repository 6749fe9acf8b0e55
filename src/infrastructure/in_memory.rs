use crate::domain::card::CreditCard;
use crate::domain::ports::{CardChange, CardStore};
use crate::error::{CardError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    cards: HashMap<u32, CreditCard>,
    issued_numbers: HashSet<String>,
}

/// A thread-safe in-memory store for credit card applications.
///
/// Both uniqueness checks and the insert happen under one write lock, so two
/// concurrent inserts of the same number cannot both succeed.
/// Cloning shares the underlying tables.
#[derive(Default, Clone)]
pub struct InMemoryCardStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCardStore {
    /// Creates a new, empty in-memory card store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn insert(&self, card: CreditCard) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.cards.contains_key(&card.id) {
            return Err(CardError::DuplicateApplication(card.id));
        }
        if !tables
            .issued_numbers
            .insert(card.card_number.as_str().to_string())
        {
            return Err(CardError::DuplicateCardNumber(
                card.card_number.last_four().to_string(),
            ));
        }
        tables.cards.insert(card.id, card);
        Ok(())
    }

    async fn modify(&self, id: u32, change: CardChange) -> Result<Option<CreditCard>> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.cards.get_mut(&id) else {
            return Ok(None);
        };
        let mut card = existing.clone();
        change(&mut card)?;
        if card.id != id || card.card_number != existing.card_number {
            return Err(CardError::Validation(format!(
                "card number of application {id} cannot change"
            )));
        }
        *existing = card.clone();
        Ok(Some(card))
    }

    async fn get(&self, id: u32) -> Result<Option<CreditCard>> {
        let tables = self.tables.read().await;
        Ok(tables.cards.get(&id).cloned())
    }

    async fn delete(&self, id: u32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.cards.remove(&id) {
            Some(card) => {
                tables.issued_numbers.remove(card.card_number.as_str());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_all(&self) -> Result<Vec<CreditCard>> {
        let tables = self.tables.read().await;
        Ok(tables.cards.values().cloned().collect())
    }
}
