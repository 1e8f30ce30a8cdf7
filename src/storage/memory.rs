use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Storage, WriteBatch, WriteOp};
use crate::core::Result;

/// Process-local storage; contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let documents = self.documents.read().await;
        Ok(documents.get(key).cloned())
    }

    async fn write(&self, batch: WriteBatch) -> Result<()> {
        // Holding the write guard across the whole batch keeps readers from
        // observing a partial apply
        let mut documents = self.documents.write().await;
        for op in batch.into_ops() {
            match op {
                WriteOp::Put { key, value } => {
                    documents.insert(key, value);
                }
                WriteOp::Delete { key } => {
                    documents.remove(&key);
                }
            }
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
