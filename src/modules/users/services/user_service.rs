use async_trait::async_trait;
use tracing::info;

use crate::core::traits::{Repository, Service};
use crate::core::{AppError, Result};
use crate::middleware::auth::hash_password;
use crate::modules::users::models::{seed_users, User, UserInput, UserQuery, UserResponse};
use crate::modules::users::repositories::UserRepository;

/// Staff account management
#[derive(Debug, Clone)]
pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    pub fn new(repository: UserRepository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &UserQuery) -> Result<Vec<UserResponse>> {
        Ok(self
            .repository
            .list_all()
            .await?
            .into_iter()
            .filter(|u| query.matches(u))
            .map(UserResponse::from)
            .collect())
    }

    async fn find(&self, id: i64) -> Result<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", id)))
    }

    pub async fn get(&self, id: i64) -> Result<UserResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, input: UserInput) -> Result<UserResponse> {
        input.validate(true)?;

        let password_hash = input.password().map(hash_password).transpose()?;
        let user = self
            .repository
            .create(User {
                id: 0,
                name: input.name.trim().to_string(),
                username: input.username.trim().to_string(),
                role: input.role,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
        Ok(user.into())
    }

    pub async fn update(&self, id: i64, input: UserInput) -> Result<UserResponse> {
        input.validate(false)?;

        let existing = self.find(id).await?;
        let username = input.username.trim().to_string();

        if existing.is_main_admin()
            && (!username.eq_ignore_ascii_case(&existing.username) || input.role != existing.role)
        {
            return Err(AppError::validation(
                "The main admin account cannot be renamed or change role",
            ));
        }

        let password_hash = match input.password() {
            Some(password) => Some(hash_password(password)?),
            None => existing.password_hash,
        };

        let user = self
            .repository
            .update(
                id,
                User {
                    id,
                    name: input.name.trim().to_string(),
                    username,
                    role: input.role,
                    password_hash,
                },
            )
            .await?;

        info!(user_id = user.id, username = %user.username, "User updated");
        Ok(user.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let existing = self.find(id).await?;
        if existing.is_main_admin() {
            return Err(AppError::validation("The main admin account cannot be deleted"));
        }

        self.repository.delete(id).await?;
        info!(user_id = id, username = %existing.username, "User deleted");
        Ok(())
    }

    /// Stored password hash of an account
    pub async fn password_hash(&self, id: i64) -> Result<Option<String>> {
        Ok(self.find(id).await?.password_hash)
    }
}

#[async_trait]
impl Service for UserService {
    async fn initialize(&self) -> Result<()> {
        let _guard = self.repository.lock().await;

        if !self.repository.is_initialized().await? {
            let users = seed_users();
            self.repository.save_all(&users).await?;
            info!(count = users.len(), "Seeded demo users");
        }

        Ok(())
    }
}
