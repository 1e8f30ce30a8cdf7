use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::ops::{Bound, RangeBounds};
use tracing::{info, warn};

use crate::core::{AppError, Result, StoreTimezone};
use crate::modules::reports::models::{
    DailySales, ProductSales, ReportPeriod, ReportQuery, SalesReport, TOP_PRODUCTS,
};
use crate::modules::transactions::models::Transaction;
use crate::modules::transactions::repositories::TransactionRepository;

/// Longest custom range accepted, in days
const MAX_RANGE_DAYS: i64 = 365;

/// Sales reporting over the transaction log
#[derive(Debug, Clone)]
pub struct ReportService {
    transactions: TransactionRepository,
    timezone: StoreTimezone,
}

impl ReportService {
    pub fn new(transactions: TransactionRepository, timezone: StoreTimezone) -> Self {
        Self {
            transactions,
            timezone,
        }
    }

    pub async fn sales_report(&self, query: &ReportQuery) -> Result<SalesReport> {
        let now = Utc::now();
        let (period, start, end) = self.window(query, now)?;

        let transactions = self.transactions.list_all().await?;
        let report = build_report(&transactions, period, start, end, &self.timezone);

        if report.is_empty() {
            warn!(period = ?period, %start, end = %report.end, "Empty sales report generated");
        } else {
            info!(
                period = ?period,
                transactions = report.transaction_count,
                total_sales = %report.total_sales,
                "Sales report generated"
            );
        }

        Ok(report)
    }

    /// Resolve the query to a window: `[start, now]` for presets,
    /// `[start of first day, start of day after last)` for custom ranges
    fn window(
        &self,
        query: &ReportQuery,
        now: DateTime<Utc>,
    ) -> Result<(ReportPeriod, DateTime<Utc>, Bound<DateTime<Utc>>)> {
        let period = match (query.period, query.start_date, query.end_date) {
            (None, Some(_), _) | (None, _, Some(_)) => ReportPeriod::Custom,
            (period, _, _) => period.unwrap_or_default(),
        };

        let start = match period {
            ReportPeriod::Day => now - Duration::days(1),
            ReportPeriod::Week => now - Duration::days(7),
            ReportPeriod::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ReportPeriod::Custom => {
                let (start_date, end_date) = match (query.start_date, query.end_date) {
                    (Some(start), Some(end)) => (start, end),
                    _ => {
                        return Err(AppError::validation(
                            "startDate and endDate are required for a custom period",
                        ))
                    }
                };
                self.validate_date_range(start_date, end_date, now)?;

                return Ok((
                    period,
                    self.timezone.start_of_day(start_date),
                    Bound::Excluded(self.timezone.end_of_day(end_date)),
                ));
            }
        };

        Ok((period, start, Bound::Included(now)))
    }

    /// Reject inverted, future or over-long ranges
    pub fn validate_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let today = self.timezone.local_date(now);

        if start_date > end_date {
            return Err(AppError::validation(
                "startDate must be before or equal to endDate",
            ));
        }

        if end_date > today {
            return Err(AppError::validation(format!(
                "endDate cannot be in the future (today is {})",
                today
            )));
        }

        let days_diff = (end_date - start_date).num_days();
        if days_diff > MAX_RANGE_DAYS {
            return Err(AppError::validation(format!(
                "Date range too large: {} days (maximum {} days)",
                days_diff, MAX_RANGE_DAYS
            )));
        }

        Ok(())
    }
}

/// Aggregate the transactions dated from `start` up to `end`
pub fn build_report(
    transactions: &[Transaction],
    period: ReportPeriod,
    start: DateTime<Utc>,
    end: Bound<DateTime<Utc>>,
    tz: &StoreTimezone,
) -> SalesReport {
    let window = (Bound::Included(start), end);
    let in_window: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| window.contains(&tx.date))
        .collect();

    let total_sales: Decimal = in_window.iter().map(|tx| tx.total).sum();
    let transaction_count = in_window.len();
    let average_transaction = if transaction_count > 0 {
        (total_sales / Decimal::from(transaction_count)).round_dp(2).normalize()
    } else {
        Decimal::ZERO
    };

    let mut by_day: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
    for tx in &in_window {
        let entry = by_day.entry(tz.local_date(tx.date)).or_default();
        entry.0 += tx.total;
        entry.1 += 1;
    }

    let sales_by_day = by_day
        .into_iter()
        .map(|(date, (total, count))| DailySales {
            date,
            label: date.format("%d %b").to_string(),
            total: total.normalize(),
            transaction_count: count,
        })
        .collect();

    let mut by_product: HashMap<&str, (i64, Decimal)> = HashMap::new();
    for item in in_window.iter().flat_map(|tx| tx.items.iter()) {
        let entry = by_product.entry(item.name.as_str()).or_default();
        entry.0 += i64::from(item.quantity);
        entry.1 += item.subtotal;
    }

    let mut top_products: Vec<ProductSales> = by_product
        .into_iter()
        .map(|(name, (quantity, total))| ProductSales {
            name: name.to_string(),
            quantity,
            total: total.normalize(),
        })
        .collect();
    top_products.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    top_products.truncate(TOP_PRODUCTS);

    let end = match end {
        Bound::Included(end) | Bound::Excluded(end) => end,
        Bound::Unbounded => Utc::now(),
    };

    SalesReport {
        period,
        start,
        end,
        total_sales: total_sales.normalize(),
        transaction_count,
        average_transaction,
        sales_by_day,
        top_products,
    }
}
