use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::core::traits::{paginate, Repository};
use crate::core::{AppError, Result};
use crate::modules::products::models::Product;
use crate::storage::{read_json, Storage, WriteBatch};

pub const PRODUCTS_KEY: &str = "products";

/// Catalog persistence.
///
/// The catalog is one JSON array. Every read-modify-write of it, including
/// checkout stock decrements, must hold [`ProductRepository::lock`].
#[derive(Debug, Clone)]
pub struct ProductRepository {
    storage: Arc<dyn Storage>,
    write_lock: Arc<Mutex<()>>,
}

impl ProductRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Acquire the catalog write lock
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Whether a catalog document has ever been written
    pub async fn is_initialized(&self) -> Result<bool> {
        Ok(self.storage.get(PRODUCTS_KEY).await?.is_some())
    }

    /// Full catalog in storage order
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        Ok(read_json(self.storage.as_ref(), PRODUCTS_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Stage the catalog document on a batch
    pub fn stage(&self, batch: &mut WriteBatch, products: &[Product]) -> Result<()> {
        batch.put_json(PRODUCTS_KEY, products)
    }

    /// Replace the whole catalog. Callers must hold the write lock.
    pub async fn save_all(&self, products: &[Product]) -> Result<()> {
        let mut batch = WriteBatch::new();
        self.stage(&mut batch, products)?;
        self.storage.write(batch).await
    }

    /// Next id: one past the current maximum
    pub fn next_id(products: &[Product]) -> i64 {
        products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

#[async_trait]
impl Repository<Product, i64> for ProductRepository {
    async fn create(&self, mut product: Product) -> Result<Product> {
        let _guard = self.lock().await;
        let mut products = self.list_all().await?;

        product.id = Self::next_id(&products);
        products.push(product.clone());
        self.save_all(&products).await?;

        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        Ok(self.list_all().await?.into_iter().find(|p| p.id == id))
    }

    async fn update(&self, id: i64, mut product: Product) -> Result<Product> {
        let _guard = self.lock().await;
        let mut products = self.list_all().await?;

        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;

        product.id = id;
        *slot = product.clone();
        self.save_all(&products).await?;

        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _guard = self.lock().await;
        let mut products = self.list_all().await?;

        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(AppError::not_found(format!("Product {}", id)));
        }

        self.save_all(&products).await
    }

    async fn list(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<Product>> {
        Ok(paginate(self.list_all().await?, limit, offset))
    }
}
