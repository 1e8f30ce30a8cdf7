use rust_decimal::Decimal;

use crate::core::error::AppError;

/// Maximum decimal places allowed on a tax rate
const MAX_RATE_SCALE: u32 = 4;

/// Tax computation on a checkout subtotal
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// tax = subtotal × rate, unrounded
    pub fn calculate_tax(&self, subtotal: Decimal, tax_rate: Decimal) -> Result<Decimal, AppError> {
        self.validate_tax_rate(tax_rate)?;

        if subtotal < Decimal::ZERO {
            return Err(AppError::Validation(
                "Subtotal cannot be negative".to_string(),
            ));
        }

        Ok((subtotal * tax_rate).normalize())
    }

    /// Rate must be within 0..=1 with at most 4 decimal places
    pub fn validate_tax_rate(&self, tax_rate: Decimal) -> Result<(), AppError> {
        if tax_rate < Decimal::ZERO {
            return Err(AppError::Validation(
                "Tax rate cannot be negative".to_string(),
            ));
        }

        if tax_rate > Decimal::ONE {
            return Err(AppError::Validation(
                "Tax rate cannot exceed 1.0 (100%)".to_string(),
            ));
        }

        if tax_rate.normalize().scale() > MAX_RATE_SCALE {
            return Err(AppError::Validation(format!(
                "Tax rate cannot have more than {} decimal places",
                MAX_RATE_SCALE
            )));
        }

        Ok(())
    }
}
