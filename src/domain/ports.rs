use super::card::CreditCard;
use super::card_number::CardNumber;
use super::network::CardNetwork;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for credit card applications.
///
/// `insert` must check id and card-number uniqueness and write the record as
/// one atomic step, failing with `DuplicateApplication` or
/// `DuplicateCardNumber` respectively.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn insert(&self, card: CreditCard) -> Result<()>;
    /// Applies `change` to the stored record under the store's write lock and
    /// returns the updated copy, or `None` if no record has `id`. A failing
    /// change leaves the record untouched. The card number is never changed.
    async fn modify(&self, id: u32, change: CardChange) -> Result<Option<CreditCard>>;
    async fn get(&self, id: u32) -> Result<Option<CreditCard>>;
    async fn delete(&self, id: u32) -> Result<bool>;
    async fn get_all(&self) -> Result<Vec<CreditCard>>;
}

/// Anything that can hand out candidate card numbers.
pub trait NumberSource: Send + Sync {
    fn next_number(&self, network: CardNetwork) -> Result<CardNumber>;
}

/// An in-place edit of one stored application.
pub type CardChange = Box<dyn FnOnce(&mut CreditCard) -> Result<()> + Send>;

pub type CardStoreBox = Box<dyn CardStore>;
pub type NumberSourceBox = Box<dyn NumberSource>;
pub type CardStoreFactory = Box<dyn Fn() -> CardStoreBox + Send + Sync>;
