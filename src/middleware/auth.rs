use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};

use crate::core::{AppError, Result};
use crate::modules::auth::{AuthService, Session};

/// Authenticated session resolved from `Authorization: Bearer <token>`.
///
/// Adding this extractor to a handler makes the route require login.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Session);

impl CurrentUser {
    pub fn session(&self) -> &Session {
        &self.0
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let auth = req.app_data::<web::Data<AuthService>>().cloned();

        Box::pin(async move {
            let auth = auth.ok_or_else(|| AppError::internal("Auth service not configured"))?;
            let token = token.ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;

            let session = auth.authenticate(&token).await?;
            Ok(CurrentUser(session))
        })
    }
}

/// Extract the token from an `Authorization: Bearer` header
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim().to_string())
        })
        .filter(|token| !token.is_empty())
}

/// SHA-256 hex digest of a session token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Hash a user password using Argon2
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
