use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, Result};

/// Username of the built-in administrator, which cannot be removed or demoted
pub const MAIN_ADMIN: &str = "admin";

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Kasir,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Kasir => "kasir",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored staff account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub role: UserRole,
    /// Argon2 PHC string; seeded demo accounts have none
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl User {
    pub fn is_main_admin(&self) -> bool {
        self.username.eq_ignore_ascii_case(MAIN_ADMIN)
    }
}

/// Account as returned by the API, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            role: user.role,
        }
    }
}

/// Create/update payload. A blank password on update keeps the current one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub password: Option<String>,
}

impl UserInput {
    /// The new password, if one was supplied
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    pub fn validate(&self, creating: bool) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }

        if self.username.trim().chars().count() < MIN_USERNAME_LEN {
            return Err(AppError::validation(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }

        if self.username.trim().chars().any(char::is_whitespace) {
            return Err(AppError::validation("Username cannot contain spaces"));
        }

        match self.password() {
            Some(password) if password.chars().count() < MIN_PASSWORD_LEN => {
                Err(AppError::validation(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LEN
                )))
            }
            None if creating => Err(AppError::validation("Password is required")),
            _ => Ok(()),
        }
    }
}

/// GET /api/users query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub search: Option<String>,
}

impl UserQuery {
    /// Case-insensitive match over name, username and role
    pub fn matches(&self, user: &User) -> bool {
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let term = term.to_lowercase();
                user.name.to_lowercase().contains(&term)
                    || user.username.to_lowercase().contains(&term)
                    || user.role.as_str().contains(&term)
            }
            None => true,
        }
    }
}

pub fn seed_users() -> Vec<User> {
    [
        (1, "Admin", "admin", UserRole::Admin),
        (2, "Budi Santoso", "budi", UserRole::Kasir),
        (3, "Siti Nurhaliza", "siti", UserRole::Kasir),
    ]
    .into_iter()
    .map(|(id, name, username, role)| User {
        id,
        name: name.to_string(),
        username: username.to_string(),
        role,
        password_hash: None,
    })
    .collect()
}
