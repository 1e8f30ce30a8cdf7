use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of products listed in the best-seller breakdown
pub const TOP_PRODUCTS: usize = 5;

/// Reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Last 24 hours
    Day,
    /// Last 7 days
    #[default]
    Week,
    /// Last calendar month
    Month,
    /// Explicit store-local date range
    Custom,
}

/// GET /api/reports/sales query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(default)]
    pub period: Option<ReportPeriod>,
    /// Start of a custom range (inclusive, YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// End of a custom range (inclusive, YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Sales of one store-local day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    /// Short chart label, e.g. `10 Nov`
    pub label: String,
    pub total: Decimal,
    pub transaction_count: usize,
}

/// Revenue of one product across the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
    pub total: Decimal,
}

/// Sales summary over a window of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: ReportPeriod,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_sales: Decimal,
    pub transaction_count: usize,
    pub average_transaction: Decimal,
    /// Ascending by date
    pub sales_by_day: Vec<DailySales>,
    /// Descending by revenue
    pub top_products: Vec<ProductSales>,
}

impl SalesReport {
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}
