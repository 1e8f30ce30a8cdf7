use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{Storage, WriteBatch, WriteOp};
use crate::core::{AppError, Result};

/// JSON file storage.
///
/// Every document lives in one pretty-printed JSON object on disk. A batch is
/// applied to a copy of the cached map, written to a sibling temp file and
/// renamed over the original, so the file always holds either the previous or
/// the next complete state.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    documents: Mutex<BTreeMap<String, Value>>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let documents = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::storage(format!(
                    "Storage file {} is not a JSON object: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %path.display(),
            documents = documents.len(),
            "File storage opened"
        );

        Ok(Self {
            path,
            documents: Mutex::new(documents),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn persist(&self, documents: &BTreeMap<String, Value>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(documents)?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let documents = self.documents.lock().await;
        Ok(documents.get(key).map(Value::to_string))
    }

    async fn write(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut documents = self.documents.lock().await;
        let mut next = documents.clone();

        for op in batch.into_ops() {
            match op {
                WriteOp::Put { key, value } => {
                    let value: Value = serde_json::from_str(&value)?;
                    next.insert(key, value);
                }
                WriteOp::Delete { key } => {
                    next.remove(&key);
                }
            }
        }

        // Cache is only swapped once the file is safely on disk
        self.persist(&next).await?;
        *documents = next;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent.to_path_buf(),
            None => PathBuf::from("."),
        };

        let metadata = tokio::fs::metadata(&dir).await?;
        if !metadata.is_dir() {
            return Err(AppError::storage(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
