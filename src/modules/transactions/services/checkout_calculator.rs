use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::carts::models::CartItem;
use crate::modules::taxes::{TaxCalculator, TaxRate};
use crate::modules::transactions::models::{CheckoutSummary, Quote};

/// Totals and change for an accepted cash payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub summary: CheckoutSummary,
    pub cash_amount: Decimal,
    pub change: Decimal,
}

/// Pure checkout arithmetic
///
/// - subtotal = Σ line subtotal
/// - tax = subtotal × rate
/// - total = subtotal + tax
/// - change = max(0, cash − total)
#[derive(Debug, Clone, Copy)]
pub struct CheckoutCalculator {
    tax: TaxCalculator,
    rate: TaxRate,
}

impl CheckoutCalculator {
    pub fn new(rate: TaxRate) -> Self {
        Self {
            tax: TaxCalculator::new(),
            rate,
        }
    }

    pub fn rate(&self) -> TaxRate {
        self.rate
    }

    pub fn summarize(&self, items: &[CartItem]) -> Result<CheckoutSummary> {
        let subtotal: Decimal = items.iter().map(|item| item.subtotal).sum();
        let tax = self.tax.calculate_tax(subtotal, self.rate.value())?;

        Ok(CheckoutSummary {
            subtotal: subtotal.normalize(),
            tax,
            total: (subtotal + tax).normalize(),
        })
    }

    pub fn change(&self, total: Decimal, cash_amount: Decimal) -> Decimal {
        if cash_amount > total {
            (cash_amount - total).normalize()
        } else {
            Decimal::ZERO
        }
    }

    /// Preview a checkout without rejecting short cash
    pub fn quote(&self, items: &[CartItem], cash_amount: Option<Decimal>) -> Result<Quote> {
        let summary = self.summarize(items)?;
        let change = cash_amount.map_or(Decimal::ZERO, |cash| self.change(summary.total, cash));
        let sufficient = cash_amount.is_some_and(|cash| cash >= summary.total);

        Ok(Quote {
            subtotal: summary.subtotal,
            tax: summary.tax,
            total: summary.total,
            cash_amount: cash_amount.map(|cash| cash.normalize()),
            change,
            sufficient,
        })
    }

    /// Accept a cash payment for `items`, rejecting empty carts, negative
    /// cash and cash below the total
    pub fn settle(&self, items: &[CartItem], cash_amount: Decimal) -> Result<Settlement> {
        if items.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        if cash_amount < Decimal::ZERO {
            return Err(AppError::validation("Cash amount cannot be negative"));
        }

        let summary = self.summarize(items)?;
        if cash_amount < summary.total {
            return Err(AppError::InsufficientCash {
                total: summary.total,
                cash: cash_amount.normalize(),
            });
        }

        Ok(Settlement {
            summary,
            cash_amount: cash_amount.normalize(),
            change: self.change(summary.total, cash_amount),
        })
    }
}

impl Default for CheckoutCalculator {
    fn default() -> Self {
        Self::new(TaxRate::standard())
    }
}
