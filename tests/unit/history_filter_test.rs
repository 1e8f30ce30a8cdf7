// Property-based tests for transaction history filtering and paging
//
// - results are a subset of the log, newest first
// - an exact date keeps only transactions on that store-local day
// - search matches customer names case-insensitively
// - pages partition the filtered list

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use umkm_pos::core::StoreTimezone;
use umkm_pos::modules::transactions::services::{DateRange, Page, TransactionFilter, PAGE_SIZE};
use umkm_pos::modules::transactions::Transaction;

const NAMES: [&str; 4] = ["Pelanggan", "Budi", "Siti Nurhaliza", "ANDI"];

fn now() -> DateTime<Utc> {
    // 16 Oct 2026, 12:00 WIB
    Utc.with_ymd_and_hms(2026, 10, 16, 5, 0, 0).unwrap()
}

fn transaction(id: i64, customer: &str, date: DateTime<Utc>) -> Transaction {
    Transaction {
        id,
        customer_name: customer.to_string(),
        items: Vec::new(),
        subtotal: Decimal::from(10_000),
        tax: Decimal::from(1_000),
        total: Decimal::from(11_000),
        cash_amount: Decimal::from(20_000),
        change: Decimal::from(9_000),
        date,
    }
}

/// Up to 40 transactions spread over the 60 days before `now()`
fn transaction_log() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((0i64..60 * 24 * 60, 0usize..NAMES.len()), 0..40).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (minutes_ago, name))| {
                transaction(
                    1_700_000_000_000 + idx as i64,
                    NAMES[name],
                    now() - Duration::minutes(minutes_ago),
                )
            })
            .collect()
    })
}

fn range() -> impl Strategy<Value = DateRange> {
    prop_oneof![
        Just(DateRange::All),
        Just(DateRange::Today),
        Just(DateRange::Week),
        Just(DateRange::Month),
    ]
}

proptest! {
    #[test]
    fn test_results_are_sorted_subset(log in transaction_log(), range in range()) {
        let tz = StoreTimezone::wib();
        let filter = TransactionFilter::new(None, None, range);
        let result = filter.apply(log.clone(), &tz, now());

        prop_assert!(result.len() <= log.len());
        prop_assert!(result.windows(2).all(|pair| pair[0].date >= pair[1].date));
        for tx in &result {
            prop_assert!(log.contains(tx));
            prop_assert!(tx.date < tz.end_of_day(tz.local_date(now())));
        }
        if range == DateRange::All {
            prop_assert_eq!(result.len(), log.len());
        }
    }

    #[test]
    fn test_exact_date_keeps_one_local_day(
        log in transaction_log(),
        days_ago in 0i64..60,
        range in range()
    ) {
        let tz = StoreTimezone::wib();
        let date = tz.local_date(now()) - Duration::days(days_ago);
        let filter = TransactionFilter::new(None, Some(date), range);

        let result = filter.apply(log.clone(), &tz, now());
        let expected = log.iter().filter(|tx| tz.local_date(tx.date) == date).count();

        prop_assert_eq!(result.len(), expected);
        prop_assert!(result.iter().all(|tx| tz.local_date(tx.date) == date));
    }

    #[test]
    fn test_search_is_case_insensitive(log in transaction_log()) {
        let tz = StoreTimezone::wib();
        let lower = TransactionFilter::new(Some("siti"), None, DateRange::All).apply(log.clone(), &tz, now());
        let upper = TransactionFilter::new(Some("  SITI "), None, DateRange::All).apply(log.clone(), &tz, now());

        prop_assert_eq!(&lower, &upper);
        prop_assert!(lower.iter().all(|tx| tx.customer_name == "Siti Nurhaliza"));
    }

    #[test]
    fn test_pages_partition_results(log in transaction_log()) {
        let total = log.len();
        let first: Page<Transaction> = Page::from_items(log.clone(), 1, PAGE_SIZE);
        let expected_pages = total.div_ceil(PAGE_SIZE as usize) as u32;

        prop_assert_eq!(first.total_items, total);
        prop_assert_eq!(first.total_pages, expected_pages);

        let mut collected = Vec::new();
        for page in 1..=expected_pages.max(1) {
            let chunk = Page::from_items(log.clone(), page, PAGE_SIZE);
            prop_assert!(chunk.items.len() <= PAGE_SIZE as usize);
            collected.extend(chunk.items);
        }
        prop_assert_eq!(collected, log);
    }
}

#[test]
fn test_today_starts_at_local_midnight() {
    let tz = StoreTimezone::wib();
    // 00:30 WIB on 16 Oct is still 15 Oct in UTC
    let just_after_midnight = Utc.with_ymd_and_hms(2026, 10, 15, 17, 30, 0).unwrap();
    let just_before_midnight = Utc.with_ymd_and_hms(2026, 10, 15, 16, 30, 0).unwrap();
    let log = vec![
        transaction(1, "Budi", just_after_midnight),
        transaction(2, "Budi", just_before_midnight),
    ];

    let result = TransactionFilter::new(None, None, DateRange::Today).apply(log, &tz, now());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}

#[test]
fn test_search_matches_transaction_id() {
    let tz = StoreTimezone::wib();
    let log = vec![
        transaction(1_760_590_000_123, "Budi", now()),
        transaction(1_760_590_000_456, "Budi", now()),
    ];

    let result = TransactionFilter::new(Some("0123"), None, DateRange::All).apply(log, &tz, now());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1_760_590_000_123);
}

#[test]
fn test_page_past_end_is_empty() {
    let log: Vec<Transaction> = (0..12)
        .map(|i| transaction(i, "Budi", now()))
        .collect();
    let page = Page::from_items(log, 5, PAGE_SIZE);

    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page, 5);
}
