use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};

/// Store profile printed on receipts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSettings {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub footer: String,
    #[serde(default = "enabled")]
    pub show_logo: bool,
    #[serde(default = "enabled")]
    pub show_tax_details: bool,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Percentage, 0..=100
    pub default_tax: Decimal,
    pub currency: Currency,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub store: StoreSettings,
    pub receipt: ReceiptSettings,
    pub app: AppSettings,
}

impl StoreSettings {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Store name is required"));
        }
        if self.address.trim().is_empty() {
            return Err(AppError::validation("Store address is required"));
        }
        if self.phone.trim().is_empty() {
            return Err(AppError::validation("Store phone is required"));
        }
        if !self.email.is_empty() && !is_valid_email(&self.email) {
            return Err(AppError::validation(format!(
                "Invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<()> {
        if self.default_tax < Decimal::ZERO || self.default_tax > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(
                "Default tax must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;
        self.app.validate()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                name: "UMKM POS Cafe".to_string(),
                address: "Jl. Contoh No. 123, Jakarta".to_string(),
                phone: "0812-3456-7890".to_string(),
                email: "info@umkmpos.com".to_string(),
            },
            receipt: ReceiptSettings {
                header: "Terima Kasih Telah Berbelanja".to_string(),
                footer: "Barang yang sudah dibeli tidak dapat dikembalikan".to_string(),
                show_logo: true,
                show_tax_details: true,
            },
            app: AppSettings {
                default_tax: Decimal::from(10),
                currency: Currency::IDR,
                theme: Theme::Light,
            },
        }
    }
}

/// Minimal `local@domain.tld` shape check
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
        }
        None => false,
    }
}
