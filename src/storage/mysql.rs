use async_trait::async_trait;
use sqlx::MySqlPool;

use super::{Storage, WriteBatch, WriteOp};
use crate::core::{AppError, Result};

/// MySQL storage over a single `kv_store` table
#[derive(Debug, Clone)]
pub struct MySqlStorage {
    pool: MySqlPool,
}

impl MySqlStorage {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Apply pending migrations from `./migrations`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::storage(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Storage migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for MySqlStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT store_value FROM kv_store WHERE store_key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn write(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for op in batch.into_ops() {
            match op {
                WriteOp::Put { key, value } => {
                    sqlx::query(
                        r#"
                        INSERT INTO kv_store (store_key, store_value)
                        VALUES (?, ?)
                        ON DUPLICATE KEY UPDATE store_value = VALUES(store_value)
                        "#,
                    )
                    .bind(key)
                    .bind(value)
                    .execute(&mut *tx)
                    .await?;
                }
                WriteOp::Delete { key } => {
                    sqlx::query("DELETE FROM kv_store WHERE store_key = ?")
                        .bind(key)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mysql"
    }
}
