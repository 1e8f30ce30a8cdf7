// Integration tests for concurrent checkout commits
//
// Storage calls yield to the scheduler so that two checkouts interleave at
// every await point:
// - one cart checked out twice commits once
// - two carts racing for the last units cannot oversell

#[path = "../helpers/mod.rs"]
mod helpers;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::Arc;

use helpers::*;
use umkm_pos::core::{AppError, Result};
use umkm_pos::modules::transactions::CheckoutRequest;
use umkm_pos::storage::{MemoryStorage, Storage, WriteBatch};

/// Memory storage that gives other tasks a turn before every call
#[derive(Debug, Default)]
struct YieldingStorage {
    inner: MemoryStorage,
}

#[async_trait]
impl Storage for YieldingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn write(&self, batch: WriteBatch) -> Result<()> {
        tokio::task::yield_now().await;
        self.inner.write(batch).await
    }

    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }

    fn backend(&self) -> &'static str {
        "yielding"
    }
}

fn pay(cash: rust_decimal::Decimal) -> CheckoutRequest {
    CheckoutRequest {
        customer_name: None,
        cash_amount: cash,
    }
}

#[actix_web::test]
async fn test_double_checkout_of_one_cart_commits_once() {
    let state = test_state_with(Arc::new(YieldingStorage::default())).await;
    let stock_before = state.products.get(KOPI_HITAM).await.unwrap().stock;

    let cart = state.carts.create().await.unwrap();
    state.carts.add_item(cart.id, KOPI_HITAM, 2).await.unwrap();

    let (first, second) = tokio::join!(
        state.checkout.checkout(cart.id, pay(dec!(50000))),
        state.checkout.checkout(cart.id, pay(dec!(50000))),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::NotFound(_)))));

    let history = state.history.list(&Default::default(), 1).await.unwrap();
    assert_eq!(history.total_items, 1);
    assert_eq!(
        state.products.get(KOPI_HITAM).await.unwrap().stock,
        stock_before - 2
    );
    assert!(state.carts.get(cart.id).await.is_err());
}

#[actix_web::test]
async fn test_racing_carts_cannot_oversell() {
    let state = test_state_with(Arc::new(YieldingStorage::default())).await;
    let stock_before = state.products.get(NASI_GORENG).await.unwrap().stock;
    let half_plus_one = stock_before / 2 + 1;

    let first_cart = state.carts.create().await.unwrap();
    let second_cart = state.carts.create().await.unwrap();
    state
        .carts
        .add_item(first_cart.id, NASI_GORENG, half_plus_one)
        .await
        .unwrap();
    state
        .carts
        .add_item(second_cart.id, NASI_GORENG, half_plus_one)
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        state.checkout.checkout(first_cart.id, pay(dec!(1000000))),
        state.checkout.checkout(second_cart.id, pay(dec!(1000000))),
    );

    let (winner, loser) = match (&first, &second) {
        (Ok(_), Err(_)) => (first_cart.id, second_cart.id),
        (Err(_), Ok(_)) => (second_cart.id, first_cart.id),
        _ => panic!("expected exactly one checkout to succeed: {:?} / {:?}", first, second),
    };
    assert!([&first, &second]
        .iter()
        .any(|r| matches!(r, Err(AppError::InsufficientStock { .. }))));

    let stock_after = state.products.get(NASI_GORENG).await.unwrap().stock;
    assert_eq!(stock_after, stock_before - half_plus_one);
    assert!(stock_after >= 0);

    let history = state.history.list(&Default::default(), 1).await.unwrap();
    assert_eq!(history.total_items, 1);

    // The rejected cart is handed back intact; the committed one is gone
    assert!(state.carts.get(winner).await.is_err());
    let returned = state.carts.get(loser).await.unwrap();
    assert_eq!(returned.item_count, half_plus_one);
}
