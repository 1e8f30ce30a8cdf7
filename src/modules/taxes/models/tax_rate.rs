use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::taxes::services::TaxCalculator;

/// Fractional sales tax rate, e.g. `0.10` for 10%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// The 10% rate applied at the register
    pub fn standard() -> Self {
        TaxRate(Decimal::new(10, 2))
    }

    pub fn new(rate: Decimal) -> Result<Self> {
        TaxCalculator::new().validate_tax_rate(rate)?;
        Ok(TaxRate(rate))
    }

    /// Build from a whole percentage such as `10`
    pub fn from_percent(percent: Decimal) -> Result<Self> {
        Self::new(percent / Decimal::ONE_HUNDRED)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn as_percent(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::standard()
    }
}
