use super::payment_method::PaymentMethod;
use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Adds a new transaction. Fails with `DuplicateId` if the id is taken.
    async fn insert(&self, tx: Transaction) -> Result<()>;
    /// Replaces an existing transaction. Fails with `NotFound` if absent.
    async fn update(&self, tx: Transaction) -> Result<()>;
    async fn get(&self, tx_id: &str) -> Result<Option<Transaction>>;
    /// Every stored transaction, in creation order.
    async fn all(&self) -> Result<Vec<Transaction>>;
    async fn clear(&self) -> Result<()>;
}

#[async_trait]
pub trait PaymentMethodStore: Send + Sync {
    async fn insert(&self, card: PaymentMethod) -> Result<()>;
    async fn get(&self, token: &str) -> Result<Option<PaymentMethod>>;
    async fn clear(&self) -> Result<()>;
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type PaymentMethodStoreBox = Box<dyn PaymentMethodStore>;
