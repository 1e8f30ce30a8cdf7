use chrono::Utc;
use std::sync::Arc;

use crate::core::{AppError, Result, StoreTimezone};
use crate::modules::settings::SettingsService;
use crate::modules::transactions::models::Transaction;
use crate::modules::transactions::repositories::TransactionRepository;
use crate::modules::transactions::services::{Page, ReceiptRenderer, TransactionFilter, PAGE_SIZE};

/// Read side of the transaction log
#[derive(Debug, Clone)]
pub struct HistoryService {
    transactions: TransactionRepository,
    settings: Arc<SettingsService>,
    timezone: StoreTimezone,
}

impl HistoryService {
    pub fn new(
        transactions: TransactionRepository,
        settings: Arc<SettingsService>,
        timezone: StoreTimezone,
    ) -> Self {
        Self {
            transactions,
            settings,
            timezone,
        }
    }

    pub async fn list(&self, filter: &TransactionFilter, page: u32) -> Result<Page<Transaction>> {
        let matched = filter.apply(self.transactions.list_all().await?, &self.timezone, Utc::now());
        Ok(Page::from_items(matched, page, PAGE_SIZE))
    }

    pub async fn get(&self, id: i64) -> Result<Transaction> {
        self.transactions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Transaction {}", id)))
    }

    /// Plain-text receipt using the current store and receipt settings
    pub async fn receipt(&self, id: i64) -> Result<String> {
        let transaction = self.get(id).await?;
        let settings = self.settings.get().await?;

        Ok(ReceiptRenderer::new(settings, self.timezone).render(&transaction))
    }
}
