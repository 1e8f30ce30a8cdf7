//! Document storage backends.
//!
//! Repositories persist each collection as one JSON document under a fixed
//! key, the way the browser front-end kept its lists in local storage.
//! Writes go through a [`WriteBatch`] that a backend applies atomically, so a
//! checkout can decrement stock and append its transaction in one step.

pub mod file;
pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::core::Result;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use mysql::MySqlStorage;

/// A single staged mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put { key: String, value: String },
    Delete { key: String },
}

impl WriteOp {
    pub fn key(&self) -> &str {
        match self {
            WriteOp::Put { key, .. } | WriteOp::Delete { key } => key,
        }
    }
}

/// Ordered set of mutations applied all-or-nothing
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ops.push(WriteOp::Put {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Serialize `value` as JSON and stage it under `key`
    pub fn put_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.put(key, json);
        Ok(())
    }

    pub fn delete(&mut self, key: impl Into<String>) {
        self.ops.push(WriteOp::Delete { key: key.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Key/value document store
#[async_trait]
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Read the raw document stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Apply every operation in `batch`, or none of them
    async fn write(&self, batch: WriteBatch) -> Result<()>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<()>;

    /// Short backend name for logs and readiness output
    fn backend(&self) -> &'static str;
}

/// Read and decode the JSON document stored under `key`
pub async fn read_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    match storage.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
