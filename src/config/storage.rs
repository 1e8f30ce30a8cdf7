use crate::core::{AppError, Result};
use crate::storage::{FileStorage, MemoryStorage, MySqlStorage, Storage};
use sqlx::mysql::MySqlPoolOptions;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Which storage backend the server persists to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
    MySql,
}

impl std::str::FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::MySql),
            other => Err(AppError::Configuration(format!(
                "Invalid STORAGE_BACKEND '{}': expected file, memory or mysql",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
    pub database_url: Option<String>,
    pub pool_size: u32,
    pub max_connections: u32,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        Ok(StorageConfig {
            backend: env::var("STORAGE_BACKEND")
                .unwrap_or_else(|_| "file".to_string())
                .parse()?,
            path: env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "./data/umkm_pos.json".to_string())
                .into(),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            pool_size: env::var("DATABASE_POOL_SIZE")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid DATABASE_POOL_SIZE".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid DATABASE_MAX_CONNECTIONS".to_string())
                })?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::MySql {
            if self.database_url.is_none() {
                return Err(AppError::Configuration(
                    "DATABASE_URL must be set when STORAGE_BACKEND=mysql".to_string(),
                ));
            }
            if self.max_connections == 0 || self.pool_size > self.max_connections {
                return Err(AppError::Configuration(
                    "DATABASE_POOL_SIZE must not exceed a non-zero DATABASE_MAX_CONNECTIONS"
                        .to_string(),
                ));
            }
        }

        if self.backend == StorageBackend::File && self.path.as_os_str().is_empty() {
            return Err(AppError::Configuration(
                "STORAGE_PATH must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Open the configured backend
    pub async fn connect(&self) -> Result<Arc<dyn Storage>> {
        match self.backend {
            StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
            StorageBackend::File => Ok(Arc::new(FileStorage::open(&self.path).await?)),
            StorageBackend::MySql => {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    AppError::Configuration("DATABASE_URL not set".to_string())
                })?;

                let pool = MySqlPoolOptions::new()
                    .max_connections(self.max_connections)
                    .min_connections(self.pool_size)
                    .acquire_timeout(Duration::from_secs(30))
                    .idle_timeout(Duration::from_secs(600))
                    .max_lifetime(Duration::from_secs(1800))
                    .test_before_acquire(true)
                    .connect(url)
                    .await?;

                let storage = MySqlStorage::new(pool);
                storage.migrate().await?;
                Ok(Arc::new(storage))
            }
        }
    }
}
