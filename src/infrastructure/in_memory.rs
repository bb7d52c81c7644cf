use crate::domain::payment_method::PaymentMethod;
use crate::domain::ports::{PaymentMethodStore, TransactionStore};
use crate::domain::transaction::Transaction;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct TransactionTable {
    by_id: HashMap<String, Transaction>,
    order: Vec<String>,
}

/// A thread-safe in-memory store for transactions.
///
/// Keeps the creation order alongside the id index so that searches without an
/// id list have a stable order. Nothing survives the process.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    table: Arc<RwLock<TransactionTable>>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, tx: Transaction) -> Result<()> {
        let mut table = self.table.write().await;
        if table.by_id.contains_key(&tx.id) {
            return Err(GatewayError::DuplicateId(tx.id));
        }
        table.order.push(tx.id.clone());
        table.by_id.insert(tx.id.clone(), tx);
        Ok(())
    }

    async fn update(&self, tx: Transaction) -> Result<()> {
        let mut table = self.table.write().await;
        match table.by_id.get_mut(&tx.id) {
            Some(stored) => {
                *stored = tx;
                Ok(())
            }
            None => Err(GatewayError::NotFound(format!("transaction {}", tx.id))),
        }
    }

    async fn get(&self, tx_id: &str) -> Result<Option<Transaction>> {
        let table = self.table.read().await;
        Ok(table.by_id.get(tx_id).cloned())
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        let table = self.table.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.by_id.get(id))
            .cloned()
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        let mut table = self.table.write().await;
        table.by_id.clear();
        table.order.clear();
        Ok(())
    }
}

/// A thread-safe in-memory vault for payment methods.
#[derive(Default, Clone)]
pub struct InMemoryPaymentMethodStore {
    cards: Arc<RwLock<HashMap<String, PaymentMethod>>>,
}

impl InMemoryPaymentMethodStore {
    /// Creates a new, empty in-memory vault.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentMethodStore for InMemoryPaymentMethodStore {
    async fn insert(&self, card: PaymentMethod) -> Result<()> {
        let mut cards = self.cards.write().await;
        if cards.contains_key(&card.token) {
            return Err(GatewayError::DuplicateId(card.token));
        }
        cards.insert(card.token.clone(), card);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<PaymentMethod>> {
        let cards = self.cards.read().await;
        Ok(cards.get(token).cloned())
    }

    async fn clear(&self) -> Result<()> {
        self.cards.write().await.clear();
        Ok(())
    }
}
