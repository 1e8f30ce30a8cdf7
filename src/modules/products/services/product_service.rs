use async_trait::async_trait;
use tracing::info;

use crate::core::traits::{Repository, Service};
use crate::core::{AppError, Result};
use crate::modules::products::models::{seed_products, Product, ProductInput};
use crate::modules::products::repositories::ProductRepository;
use crate::modules::products::services::ProductFilter;

/// Catalog management
#[derive(Debug, Clone)]
pub struct ProductService {
    repository: ProductRepository,
}

impl ProductService {
    pub fn new(repository: ProductRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &ProductRepository {
        &self.repository
    }

    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        Ok(filter.apply(self.repository.list_all().await?))
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", id)))
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        input.validate()?;

        // Id is assigned by the repository under the catalog lock
        let product = self.repository.create(input.into_product(0)).await?;

        info!(
            product_id = product.id,
            name = %product.name,
            stock = product.stock,
            "Product created"
        );

        Ok(product)
    }

    pub async fn update(&self, id: i64, input: ProductInput) -> Result<Product> {
        input.validate()?;

        let product = self.repository.update(id, input.into_product(id)).await?;

        info!(
            product_id = product.id,
            price = %product.price,
            stock = product.stock,
            "Product updated"
        );

        Ok(product)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }
}

#[async_trait]
impl Service for ProductService {
    async fn initialize(&self) -> Result<()> {
        let _guard = self.repository.lock().await;

        if !self.repository.is_initialized().await? {
            let products = seed_products();
            self.repository.save_all(&products).await?;
            info!(count = products.len(), "Seeded demo catalog");
        }

        Ok(())
    }
}
