use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::core::traits::{paginate, Repository};
use crate::core::{AppError, Result};
use crate::modules::users::models::User;
use crate::storage::{read_json, Storage, WriteBatch};

pub const USERS_KEY: &str = "users";

#[derive(Debug, Clone)]
pub struct UserRepository {
    storage: Arc<dyn Storage>,
    write_lock: Arc<Mutex<()>>,
}

impl UserRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub async fn is_initialized(&self) -> Result<bool> {
        Ok(self.storage.get(USERS_KEY).await?.is_some())
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        Ok(read_json(self.storage.as_ref(), USERS_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username)))
    }

    /// Replace all users. Callers must hold the write lock.
    pub async fn save_all(&self, users: &[User]) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.put_json(USERS_KEY, users)?;
        self.storage.write(batch).await
    }

    fn ensure_unique(users: &[User], username: &str, except_id: Option<i64>) -> Result<()> {
        let taken = users
            .iter()
            .any(|u| Some(u.id) != except_id && u.username.eq_ignore_ascii_case(username));

        if taken {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<User, i64> for UserRepository {
    async fn create(&self, mut user: User) -> Result<User> {
        let _guard = self.lock().await;
        let mut users = self.list_all().await?;

        Self::ensure_unique(&users, &user.username, None)?;

        user.id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(user.clone());
        self.save_all(&users).await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.list_all().await?.into_iter().find(|u| u.id == id))
    }

    async fn update(&self, id: i64, mut user: User) -> Result<User> {
        let _guard = self.lock().await;
        let mut users = self.list_all().await?;

        Self::ensure_unique(&users, &user.username, Some(id))?;

        let slot = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;

        user.id = id;
        *slot = user.clone();
        self.save_all(&users).await?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _guard = self.lock().await;
        let mut users = self.list_all().await?;

        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AppError::not_found(format!("User {}", id)));
        }

        self.save_all(&users).await
    }

    async fn list(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<User>> {
        Ok(paginate(self.list_all().await?, limit, offset))
    }
}
