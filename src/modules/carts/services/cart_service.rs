use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::traits::Repository;
use crate::core::{AppError, Result};
use crate::modules::carts::models::{Cart, CartView};
use crate::modules::products::models::Product;
use crate::modules::products::ProductRepository;
use crate::modules::transactions::services::CheckoutCalculator;

/// Registry of in-progress carts, one per checkout session.
///
/// Carts left untouched for longer than the idle TTL are dropped the next
/// time a cart is opened.
#[derive(Debug)]
pub struct CartService {
    carts: RwLock<HashMap<Uuid, Cart>>,
    products: ProductRepository,
    calculator: CheckoutCalculator,
    idle_ttl: Duration,
}

impl CartService {
    pub fn new(products: ProductRepository, calculator: CheckoutCalculator, idle_ttl: Duration) -> Self {
        Self {
            carts: RwLock::new(HashMap::new()),
            products,
            calculator,
            idle_ttl,
        }
    }

    fn view(&self, cart: &Cart) -> Result<CartView> {
        Ok(CartView::new(cart, self.calculator.summarize(cart.items())?))
    }

    async fn product(&self, product_id: i64) -> Result<Product> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", product_id)))
    }

    /// Run `f` against cart `id` under the registry write lock
    async fn with_cart<F>(&self, id: Uuid, f: F) -> Result<CartView>
    where
        F: FnOnce(&mut Cart) -> Result<()>,
    {
        let mut carts = self.carts.write().await;
        let cart = carts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Cart {}", id)))?;

        f(cart)?;
        cart.touch(Utc::now());
        self.view(cart)
    }

    pub async fn create(&self) -> Result<CartView> {
        let cart = Cart::new();
        let view = self.view(&cart)?;

        let mut carts = self.carts.write().await;
        let pruned = Self::prune(&mut carts, cart.created_at(), self.idle_ttl);
        if pruned > 0 {
            info!(pruned, "Idle carts expired");
        }
        carts.insert(cart.id(), cart);
        info!(cart_id = %view.id, "Cart opened");

        Ok(view)
    }

    fn prune(carts: &mut HashMap<Uuid, Cart>, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = carts.len();
        carts.retain(|_, cart| !cart.is_idle(now, ttl));
        before - carts.len()
    }

    /// Drop carts idle as of `now`, returning how many were removed
    pub async fn prune_idle(&self, now: DateTime<Utc>) -> usize {
        Self::prune(&mut *self.carts.write().await, now, self.idle_ttl)
    }

    pub async fn get(&self, id: Uuid) -> Result<CartView> {
        let carts = self.carts.read().await;
        let cart = carts
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Cart {}", id)))?;
        self.view(cart)
    }

    /// Copy of the cart for quoting
    pub async fn snapshot(&self, id: Uuid) -> Result<Cart> {
        self.carts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Cart {}", id)))
    }

    /// Remove a cart from the registry for checkout. Only one caller can
    /// take a given cart; later callers get `NotFound`.
    pub async fn take(&self, id: Uuid) -> Result<Cart> {
        self.carts
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Cart {}", id)))
    }

    /// Put back a cart whose checkout did not complete
    pub async fn restore(&self, cart: Cart) {
        self.carts.write().await.insert(cart.id(), cart);
    }

    /// Cancel a cart
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.carts
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Cart {}", id)))?;

        info!(cart_id = %id, "Cart cancelled");
        Ok(())
    }

    pub async fn add_item(&self, id: Uuid, product_id: i64, quantity: i32) -> Result<CartView> {
        let product = self.product(product_id).await?;

        self.with_cart(id, |cart| {
            let line = cart.add_item(&product, quantity)?;
            debug!(cart_id = %id, product_id, quantity = line.quantity, "Cart line added");
            Ok(())
        })
        .await
    }

    pub async fn update_item(&self, id: Uuid, product_id: i64, quantity: i32) -> Result<CartView> {
        // Removal works even when the product has left the catalog
        if quantity <= 0 {
            return self
                .with_cart(id, |cart| {
                    cart.remove_line(product_id)?;
                    debug!(cart_id = %id, product_id, "Cart line removed");
                    Ok(())
                })
                .await;
        }

        let product = self.product(product_id).await?;

        self.with_cart(id, |cart| {
            match cart.update_quantity(&product, quantity)? {
                Some(line) => {
                    debug!(cart_id = %id, product_id, quantity = line.quantity, "Cart line updated")
                }
                None => debug!(cart_id = %id, product_id, "Cart line removed"),
            }
            Ok(())
        })
        .await
    }

    pub async fn remove_item(&self, id: Uuid, product_id: i64) -> Result<CartView> {
        self.with_cart(id, |cart| {
            cart.remove_item(product_id);
            Ok(())
        })
        .await
    }

    pub async fn clear(&self, id: Uuid) -> Result<CartView> {
        self.with_cart(id, |cart| {
            cart.clear();
            Ok(())
        })
        .await
    }

    pub async fn active_count(&self) -> usize {
        self.carts.read().await.len()
    }
}
