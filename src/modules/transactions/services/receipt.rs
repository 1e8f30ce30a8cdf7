use rust_decimal::Decimal;

use crate::core::{Currency, StoreTimezone};
use crate::modules::settings::models::Settings;
use crate::modules::transactions::models::Transaction;

/// Characters per receipt line (58mm thermal paper)
pub const RECEIPT_WIDTH: usize = 32;

/// Plain-text receipt for a recorded transaction
#[derive(Debug, Clone)]
pub struct ReceiptRenderer {
    settings: Settings,
    timezone: StoreTimezone,
}

impl ReceiptRenderer {
    pub fn new(settings: Settings, timezone: StoreTimezone) -> Self {
        Self { settings, timezone }
    }

    fn currency(&self) -> Currency {
        self.settings.app.currency
    }

    fn money(&self, amount: Decimal) -> String {
        self.currency().format_amount(amount)
    }

    pub fn render(&self, transaction: &Transaction) -> String {
        let store = &self.settings.store;
        let receipt = &self.settings.receipt;
        let rule = "-".repeat(RECEIPT_WIDTH);
        let mut lines = Vec::new();

        if receipt.show_logo {
            lines.push(center(&format!("*** {} ***", store.name.to_uppercase())));
        } else {
            lines.push(center(&store.name));
        }
        lines.push(center(&store.address));
        lines.push(center(&format!("Telp: {}", store.phone)));
        if !store.email.is_empty() {
            lines.push(center(&store.email));
        }
        for header in receipt.header.lines().filter(|l| !l.trim().is_empty()) {
            lines.push(center(header));
        }

        lines.push(rule.clone());
        lines.push(format!("No       : {}", transaction.id));
        lines.push(format!(
            "Tanggal  : {}",
            self.timezone.format_local(transaction.date)
        ));
        lines.push(format!("Pelanggan: {}", transaction.customer_name));
        lines.push(rule.clone());

        for item in &transaction.items {
            lines.push(item.name.clone());
            lines.push(columns(
                &format!("  {} x {}", item.quantity, self.money(item.price)),
                &self.money(item.subtotal),
            ));
        }

        lines.push(rule.clone());
        lines.push(columns("Subtotal", &self.money(transaction.subtotal)));
        if receipt.show_tax_details {
            lines.push(columns(
                &format!("Pajak ({}%)", tax_percent(transaction)),
                &self.money(transaction.tax),
            ));
        }
        lines.push(columns("Total", &self.money(transaction.total)));
        lines.push(columns("Tunai", &self.money(transaction.cash_amount)));
        lines.push(columns("Kembali", &self.money(transaction.change)));
        lines.push(rule);

        for footer in receipt.footer.lines().filter(|l| !l.trim().is_empty()) {
            lines.push(center(footer));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

fn tax_percent(transaction: &Transaction) -> Decimal {
    if transaction.subtotal.is_zero() {
        return Decimal::ZERO;
    }
    (transaction.tax * Decimal::ONE_HUNDRED / transaction.subtotal)
        .round_dp(2)
        .normalize()
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= RECEIPT_WIDTH {
        return text.to_string();
    }
    let pad = (RECEIPT_WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Left label, right-aligned value
fn columns(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = RECEIPT_WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}
