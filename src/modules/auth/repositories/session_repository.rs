use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::Result;
use crate::modules::auth::models::Session;
use crate::storage::{read_json, Storage, WriteBatch};

pub const SESSIONS_KEY: &str = "sessions";

#[derive(Debug, Clone)]
pub struct SessionRepository {
    storage: Arc<dyn Storage>,
    write_lock: Arc<Mutex<()>>,
}

impl SessionRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        Ok(read_json(self.storage.as_ref(), SESSIONS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save_all(&self, sessions: &[Session]) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.put_json(SESSIONS_KEY, sessions)?;
        self.storage.write(batch).await
    }

    pub async fn find(&self, token_hash: &str) -> Result<Option<Session>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|s| s.token_hash == token_hash))
    }

    /// Store a new session, pruning expired ones
    pub async fn insert(&self, session: Session, now: DateTime<Utc>) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut sessions = self.list_all().await?;
        sessions.retain(|s| !s.is_expired(now));
        sessions.push(session);

        self.save_all(&sessions).await
    }

    /// Remove a session; returns whether it existed
    pub async fn remove(&self, token_hash: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut sessions = self.list_all().await?;
        let before = sessions.len();
        sessions.retain(|s| s.token_hash != token_hash);

        if sessions.len() == before {
            return Ok(false);
        }

        self.save_all(&sessions).await?;
        Ok(true)
    }
}
