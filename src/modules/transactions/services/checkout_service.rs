use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::carts::models::Cart;
use crate::modules::carts::CartService;
use crate::modules::products::ProductRepository;
use crate::modules::transactions::models::{CheckoutRequest, Quote, QuoteRequest, Transaction};
use crate::modules::transactions::repositories::TransactionRepository;
use crate::modules::transactions::services::CheckoutCalculator;
use crate::storage::{Storage, WriteBatch};

/// Commits carts into transactions.
///
/// A commit runs under the catalog write lock with the cart taken out of
/// the registry: every line is re-checked against current stock, then the
/// decremented catalog and the appended transaction log go to storage in a
/// single batch. Any rejection puts the cart back and leaves catalog and log
/// untouched.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    storage: Arc<dyn Storage>,
    products: ProductRepository,
    transactions: TransactionRepository,
    carts: Arc<CartService>,
    calculator: CheckoutCalculator,
}

impl CheckoutService {
    pub fn new(
        storage: Arc<dyn Storage>,
        products: ProductRepository,
        transactions: TransactionRepository,
        carts: Arc<CartService>,
        calculator: CheckoutCalculator,
    ) -> Self {
        Self {
            storage,
            products,
            transactions,
            carts,
            calculator,
        }
    }

    /// Totals and change for a proposed cash amount, without committing
    pub async fn quote(&self, cart_id: Uuid, request: &QuoteRequest) -> Result<Quote> {
        let cart = self.carts.snapshot(cart_id).await?;
        self.calculator.quote(cart.items(), request.cash_amount)
    }

    pub async fn checkout(&self, cart_id: Uuid, request: CheckoutRequest) -> Result<Transaction> {
        let _guard = self.products.lock().await;

        // Taking the cart makes a concurrent checkout of the same cart miss it
        let cart = self.carts.take(cart_id).await?;

        match self.commit(&cart, &request).await {
            Ok(transaction) => {
                info!(
                    transaction_id = transaction.id,
                    customer = %transaction.customer_name,
                    items = transaction.item_count(),
                    total = %transaction.total,
                    change = %transaction.change,
                    "Checkout completed"
                );
                Ok(transaction)
            }
            Err(e) => {
                self.carts.restore(cart).await;
                Err(e)
            }
        }
    }

    /// Validate and write one cart. Caller holds the catalog lock.
    async fn commit(&self, cart: &Cart, request: &CheckoutRequest) -> Result<Transaction> {
        let cart_id = cart.id();

        let settlement = self
            .calculator
            .settle(cart.items(), request.cash_amount)
            .inspect_err(|e| warn!(cart_id = %cart_id, error = %e, "Checkout rejected"))?;

        let mut products = self.products.list_all().await?;
        for item in cart.items() {
            let product = products
                .iter_mut()
                .find(|p| p.id == item.id)
                .ok_or_else(|| AppError::not_found(format!("Product {}", item.id)))?;

            if item.quantity > product.stock {
                warn!(
                    cart_id = %cart_id,
                    product_id = product.id,
                    available = product.stock,
                    requested = item.quantity,
                    "Checkout rejected: stock changed since the item was added"
                );
                return Err(AppError::insufficient_stock(
                    product.name.clone(),
                    product.stock,
                    item.quantity,
                ));
            }

            product.stock -= item.quantity;
        }

        let mut transactions = self.transactions.list_all().await?;
        let now = Utc::now();
        let transaction = Transaction {
            id: TransactionRepository::next_id(&transactions, now),
            customer_name: request.customer_name(),
            items: cart.items().to_vec(),
            subtotal: settlement.summary.subtotal,
            tax: settlement.summary.tax,
            total: settlement.summary.total,
            cash_amount: settlement.cash_amount,
            change: settlement.change,
            date: now,
        };
        transactions.push(transaction.clone());

        let mut batch = WriteBatch::new();
        self.products.stage(&mut batch, &products)?;
        self.transactions.stage(&mut batch, &transactions)?;

        self.storage.write(batch).await.inspect_err(|e| {
            error!(
                cart_id = %cart_id,
                backend = self.storage.backend(),
                error = %e,
                "Failed to commit checkout"
            )
        })?;

        Ok(transaction)
    }
}
