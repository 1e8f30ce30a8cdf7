use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::core::Result;
use crate::modules::transactions::models::Transaction;
use crate::storage::{read_json, Storage, WriteBatch};

pub const TRANSACTIONS_KEY: &str = "transactions";

/// Append-only transaction log.
///
/// Appends are staged on the checkout batch together with the catalog, under
/// the catalog write lock; there is no standalone write path.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    storage: Arc<dyn Storage>,
}

impl TransactionRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All transactions in append order
    pub async fn list_all(&self) -> Result<Vec<Transaction>> {
        Ok(read_json(self.storage.as_ref(), TRANSACTIONS_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        Ok(self.list_all().await?.into_iter().find(|tx| tx.id == id))
    }

    pub fn stage(&self, batch: &mut WriteBatch, transactions: &[Transaction]) -> Result<()> {
        batch.put_json(TRANSACTIONS_KEY, transactions)
    }

    /// Millisecond timestamp id, bumped past the newest existing id
    pub fn next_id(transactions: &[Transaction], now: DateTime<Utc>) -> i64 {
        let last = transactions.iter().map(|tx| tx.id).max().unwrap_or(0);
        now.timestamp_millis().max(last.saturating_add(1))
    }
}
