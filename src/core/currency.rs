use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the store can be configured to display, with their decimal precision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indonesian Rupiah (no decimal places)
    #[default]
    IDR,
    /// US Dollar (2 decimal places)
    USD,
    /// Euro (2 decimal places)
    EUR,
}

impl Currency {
    /// Returns the decimal scale for this currency
    /// - IDR: 0 (no decimals)
    /// - USD/EUR: 2 (2 decimal places)
    pub fn scale(&self) -> u32 {
        match self {
            Currency::IDR => 0,
            Currency::USD | Currency::EUR => 2,
        }
    }

    /// Display symbol used on receipts
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::IDR => "Rp",
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Validates that a decimal value has the correct scale for this currency
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), String> {
        let scale = amount.normalize().scale();
        let expected_scale = self.scale();

        if scale > expected_scale {
            return Err(format!(
                "{} amounts must have at most {} decimal places, got {}",
                self, expected_scale, scale
            ));
        }

        if amount < Decimal::ZERO {
            return Err(format!("{} amount cannot be negative", self));
        }

        Ok(())
    }

    /// Formats an amount for display, e.g. `Rp 33.000` or `$ 1,234.50`
    pub fn format_amount(&self, amount: Decimal) -> String {
        let (thousands, decimal_mark) = match self {
            Currency::IDR | Currency::EUR => ('.', ','),
            Currency::USD => (',', '.'),
        };

        let rounded = self.round(amount);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = format!("{:.width$}", rounded.abs(), width = self.scale() as usize);
        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer.to_string(), Some(fraction.to_string())),
            None => (text, None),
        };

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (idx, ch) in integer.chars().enumerate() {
            if idx > 0 && (integer.len() - idx) % 3 == 0 {
                grouped.push(thousands);
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        match fraction {
            Some(fraction) => format!("{} {}{}{}{}", self.symbol(), sign, grouped, decimal_mark, fraction),
            None => format!("{} {}{}", self.symbol(), sign, grouped),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::IDR => write!(f, "IDR"),
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IDR" => Ok(Currency::IDR),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
