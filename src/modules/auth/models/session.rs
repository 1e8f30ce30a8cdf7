use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::users::models::UserRole;

/// Persisted login session. Only the SHA-256 of the bearer token is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token_hash: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if self.password.chars().count() < 6 {
            return Err(AppError::validation("Password must be at least 6 characters"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}
