use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, Result};

/// Image shown for products created without one
pub const DEFAULT_IMAGE: &str = "/placeholder.svg";

/// Catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Makanan,
    Minuman,
    Snack,
    Lainnya,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::Makanan,
        ProductCategory::Minuman,
        ProductCategory::Snack,
        ProductCategory::Lainnya,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Makanan => "Makanan",
            ProductCategory::Minuman => "Minuman",
            ProductCategory::Snack => "Snack",
            ProductCategory::Lainnya => "Lainnya",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::validation(format!("Unknown product category: {}", s)))
    }
}

/// A catalog entry. Catalog stock is the single source of truth for
/// availability; only catalog edits and completed checkouts change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: ProductCategory,
    pub image: String,
}

/// Create/update payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: ProductCategory,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductInput {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name is required"));
        }

        if self.price <= Decimal::ZERO {
            return Err(AppError::validation("Product price must be greater than 0"));
        }

        if self.stock < 0 {
            return Err(AppError::validation("Product stock cannot be negative"));
        }

        Ok(())
    }

    /// Build the stored product, filling in the placeholder image
    pub fn into_product(self, id: i64) -> Product {
        let image = self
            .image
            .map(|image| image.trim().to_string())
            .filter(|image| !image.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

        Product {
            id,
            name: self.name.trim().to_string(),
            price: self.price.normalize(),
            stock: self.stock,
            category: self.category,
            image,
        }
    }
}

/// Demo catalog written on first start
pub fn seed_products() -> Vec<Product> {
    let items = [
        (1, "Kopi Hitam", 15000, 20, ProductCategory::Minuman),
        (2, "Kopi Latte", 20000, 15, ProductCategory::Minuman),
        (3, "Teh Tarik", 15000, 25, ProductCategory::Minuman),
        (4, "Roti Bakar", 12000, 18, ProductCategory::Makanan),
        (5, "Nasi Goreng", 25000, 10, ProductCategory::Makanan),
        (6, "Mie Goreng", 20000, 12, ProductCategory::Makanan),
    ];

    items
        .into_iter()
        .map(|(id, name, price, stock, category)| Product {
            id,
            name: name.to_string(),
            price: Decimal::from(price),
            stock,
            category,
            image: DEFAULT_IMAGE.to_string(),
        })
        .collect()
}
