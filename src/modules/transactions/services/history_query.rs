use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::StoreTimezone;
use crate::modules::transactions::models::Transaction;

/// Transactions per history page
pub const PAGE_SIZE: u32 = 10;

/// Relative window for history filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

/// GET /api/transactions query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// Exact store-local date, takes precedence over `range`
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub range: Option<DateRange>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// History search and date filter, evaluated in store-local time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    search: Option<String>,
    date: Option<NaiveDate>,
    range: DateRange,
}

impl TransactionFilter {
    pub fn new(search: Option<&str>, date: Option<NaiveDate>, range: DateRange) -> Self {
        Self {
            search: search
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_lowercase),
            date,
            range,
        }
    }

    pub fn from_query(query: &HistoryQuery) -> Self {
        Self::new(
            query.search.as_deref(),
            query.date,
            query.range.unwrap_or_default(),
        )
    }

    /// `[start, end)` UTC window for the relative range, or `None` for `All`
    fn window(&self, tz: &StoreTimezone, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = tz.local_date(now);
        let first_day = match self.range {
            DateRange::All => return None,
            DateRange::Today => today,
            DateRange::Week => today - chrono::Duration::days(7),
            DateRange::Month => today
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN),
        };

        Some((tz.start_of_day(first_day), tz.end_of_day(today)))
    }

    pub fn matches(&self, transaction: &Transaction, tz: &StoreTimezone, now: DateTime<Utc>) -> bool {
        if let Some(term) = &self.search {
            let id_match = transaction.id.to_string().contains(term.as_str());
            let name_match = transaction.customer_name.to_lowercase().contains(term.as_str());
            if !id_match && !name_match {
                return false;
            }
        }

        if let Some(date) = self.date {
            return tz.local_date(transaction.date) == date;
        }

        match self.window(tz, now) {
            Some((start, end)) => transaction.date >= start && transaction.date < end,
            None => true,
        }
    }

    /// Matching transactions, newest first
    pub fn apply(
        &self,
        transactions: Vec<Transaction>,
        tz: &StoreTimezone,
        now: DateTime<Utc>,
    ) -> Vec<Transaction> {
        let mut matched: Vec<Transaction> = transactions
            .into_iter()
            .filter(|tx| self.matches(tx, tz, now))
            .collect();

        matched.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        matched
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Slice `items` to 1-based `page`; pages past the end are empty
    pub fn from_items(items: Vec<T>, page: u32, per_page: u32) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page as usize) as u32;

        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let items = items
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }
}
