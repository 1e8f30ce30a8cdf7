use async_trait::async_trait;

use crate::core::Result;

/// Base repository trait for CRUD operations over a persisted collection
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// Create a new entity, assigning its ID
    async fn create(&self, entity: T) -> Result<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: ID) -> Result<Option<T>>;

    /// Replace an existing entity
    async fn update(&self, id: ID, entity: T) -> Result<T>;

    /// Delete an entity by ID
    async fn delete(&self, id: ID) -> Result<()>;

    /// List all entities (with optional pagination)
    async fn list(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<T>>;
}

/// Apply optional `limit`/`offset` pagination to an in-memory collection
pub fn paginate<T>(items: Vec<T>, limit: Option<u32>, offset: Option<u32>) -> Vec<T> {
    let offset = offset.unwrap_or(0) as usize;
    let iter = items.into_iter().skip(offset);
    match limit {
        Some(limit) => iter.take(limit as usize).collect(),
        None => iter.collect(),
    }
}
