use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::carts::models::CartItem;

/// Customer name recorded when the cashier leaves it blank
pub const DEFAULT_CUSTOMER_NAME: &str = "Pelanggan";

/// A completed sale. Written once at checkout and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Millisecond timestamp, strictly increasing across transactions
    pub id: i64,
    pub customer_name: String,
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub cash_amount: Decimal,
    pub change: Decimal,
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Total units sold
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Subtotal, tax and total of a set of cart lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// POST /api/carts/{id}/checkout body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub customer_name: Option<String>,
    pub cash_amount: Decimal,
}

impl CheckoutRequest {
    pub fn customer_name(&self) -> String {
        self.customer_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CUSTOMER_NAME)
            .to_string()
    }
}

/// POST /api/carts/{id}/quote body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub cash_amount: Option<Decimal>,
}

/// Non-committing checkout preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub cash_amount: Option<Decimal>,
    pub change: Decimal,
    /// Whether the cash amount covers the total
    pub sufficient: bool,
}
