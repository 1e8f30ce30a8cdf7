// Test application state
//
// Builds the same AppState main.rs does, over in-memory (or caller
// supplied) storage.

use actix_web::http::header;
use std::sync::Arc;

use umkm_pos::core::StoreTimezone;
use umkm_pos::middleware::RateLimiter;
use umkm_pos::modules::auth::LoginRequest;
use umkm_pos::storage::{MemoryStorage, Storage};
use umkm_pos::AppState;

pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "password";
pub const CART_TTL_MINUTES: u32 = 120;

/// Seeded state over a fresh in-memory store
pub async fn test_state() -> AppState {
    test_state_with(Arc::new(MemoryStorage::new())).await
}

/// Seeded state over the given storage backend
pub async fn test_state_with(storage: Arc<dyn Storage>) -> AppState {
    let limiter = RateLimiter::new(1_000).expect("Failed to create rate limiter");
    let state = AppState::new(storage, StoreTimezone::wib(), 12, CART_TTL_MINUTES, limiter);
    state.initialize().await.expect("Failed to seed test storage");
    state
}

/// State whose login endpoint allows only `per_minute` attempts
pub async fn test_state_with_login_limit(per_minute: u32) -> AppState {
    let limiter = RateLimiter::new(per_minute).expect("Failed to create rate limiter");
    let state = AppState::new(
        Arc::new(MemoryStorage::new()),
        StoreTimezone::wib(),
        12,
        CART_TTL_MINUTES,
        limiter,
    );
    state.initialize().await.expect("Failed to seed test storage");
    state
}

/// Log in with the demo credential and return the bearer token
pub async fn login_token(state: &AppState) -> String {
    state
        .auth
        .login(LoginRequest {
            username: DEMO_USERNAME.to_string(),
            password: DEMO_PASSWORD.to_string(),
        })
        .await
        .expect("Demo login failed")
        .token
}

/// `Authorization` header pair for `TestRequest::insert_header`
pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
