use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::products::models::{Product, ProductCategory};
use crate::modules::transactions::models::CheckoutSummary;

/// A cart line: a snapshot of the product plus quantity and line subtotal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: ProductCategory,
    pub image: String,
    pub quantity: i32,
    pub subtotal: Decimal,
}

impl CartItem {
    fn new(product: &Product, quantity: i32) -> Self {
        let mut item = Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            category: product.category,
            image: product.image.clone(),
            quantity: 0,
            subtotal: Decimal::ZERO,
        };
        item.set_quantity(product, quantity);
        item
    }

    /// Refresh the snapshot from the catalog and recompute the subtotal
    fn set_quantity(&mut self, product: &Product, quantity: i32) {
        self.price = product.price;
        self.stock = product.stock;
        self.quantity = quantity;
        self.subtotal = (self.price * Decimal::from(quantity)).normalize();
    }
}

/// Working copy of a checkout in progress.
///
/// A line's quantity never exceeds the catalog stock seen when it was last
/// added or updated.
#[derive(Debug, Clone)]
pub struct Cart {
    id: Uuid,
    items: Vec<CartItem>,
    created_at: DateTime<Utc>,
    touched_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            items: Vec::new(),
            created_at: now,
            touched_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn touched_at(&self) -> DateTime<Utc> {
        self.touched_at
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.touched_at = now;
    }

    /// Untouched for at least `ttl` as of `now`
    pub fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.touched_at >= ttl
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }

    /// Quantity of `product_id` currently in the cart
    pub fn quantity_of(&self, product_id: i64) -> i32 {
        self.items
            .iter()
            .find(|item| item.id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Total units across all lines
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(|item| item.subtotal).sum()
    }

    /// Add `quantity` units of `product`, merging into an existing line
    pub fn add_item(&mut self, product: &Product, quantity: i32) -> Result<&CartItem> {
        if quantity < 1 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }

        let requested = self.quantity_of(product.id).saturating_add(quantity);
        if requested > product.stock {
            return Err(AppError::insufficient_stock(
                product.name.clone(),
                product.stock,
                requested,
            ));
        }

        let index = match self.items.iter().position(|item| item.id == product.id) {
            Some(index) => {
                self.items[index].set_quantity(product, requested);
                index
            }
            None => {
                self.items.push(CartItem::new(product, requested));
                self.items.len() - 1
            }
        };

        Ok(&self.items[index])
    }

    /// Set a line's quantity. Zero or less removes the line and returns `None`.
    pub fn update_quantity(&mut self, product: &Product, quantity: i32) -> Result<Option<&CartItem>> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == product.id)
            .ok_or_else(|| AppError::not_found(format!("Product {} in cart", product.id)))?;

        if quantity <= 0 {
            self.items.remove(index);
            return Ok(None);
        }

        if quantity > product.stock {
            return Err(AppError::insufficient_stock(
                product.name.clone(),
                product.stock,
                quantity,
            ));
        }

        self.items[index].set_quantity(product, quantity);
        Ok(Some(&self.items[index]))
    }

    /// Drop a line that must be in the cart, without consulting the catalog
    pub fn remove_line(&mut self, product_id: i64) -> Result<()> {
        if !self.contains(product_id) {
            return Err(AppError::not_found(format!("Product {} in cart", product_id)));
        }
        self.remove_item(product_id);
        Ok(())
    }

    /// Drop a line; absent lines are ignored
    pub fn remove_item(&mut self, product_id: i64) {
        self.items.retain(|item| item.id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart as returned by the API, with its live checkout summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: Uuid,
    pub items: Vec<CartItem>,
    pub item_count: i32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl CartView {
    pub fn new(cart: &Cart, summary: CheckoutSummary) -> Self {
        Self {
            id: cart.id(),
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            subtotal: summary.subtotal,
            tax: summary.tax,
            total: summary.total,
            created_at: cart.created_at(),
        }
    }
}
