use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::middleware::auth::hash_token;
use crate::modules::auth::models::{LoginRequest, LoginResponse, Session, SessionUser};
use crate::modules::auth::repositories::SessionRepository;
use crate::modules::users::models::UserRole;

/// Demo credential accepted by the login form
const DEMO_USERNAME: &str = "admin";
const DEMO_PASSWORD: &str = "password";

/// Login sessions backed by bearer tokens
#[derive(Debug, Clone)]
pub struct AuthService {
    sessions: SessionRepository,
    ttl: Duration,
}

impl AuthService {
    pub fn new(sessions: SessionRepository, ttl_hours: u32) -> Self {
        Self {
            sessions,
            ttl: Duration::hours(i64::from(ttl_hours)),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        request.validate()?;

        if request.username != DEMO_USERNAME || request.password != DEMO_PASSWORD {
            warn!(username = %request.username, "Login rejected");
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let token = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let session = Session {
            token_hash: hash_token(&token),
            username: request.username,
            role: UserRole::Admin,
            created_at: now,
            expires_at: now + self.ttl,
        };

        let response = LoginResponse {
            token,
            user: SessionUser {
                username: session.username.clone(),
                role: session.role,
            },
            expires_at: session.expires_at,
        };

        self.sessions.insert(session, now).await?;
        info!(username = %response.user.username, "Login succeeded");

        Ok(response)
    }

    /// Resolve a bearer token to its live session
    pub async fn authenticate(&self, token: &str) -> Result<Session> {
        let session = self
            .sessions
            .find(&hash_token(token))
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid session token"))?;

        if session.is_expired(Utc::now()) {
            return Err(AppError::unauthorized("Session expired"));
        }

        Ok(session)
    }

    pub async fn logout(&self, session: &Session) -> Result<()> {
        if self.sessions.remove(&session.token_hash).await? {
            info!(username = %session.username, "Logged out");
        }
        Ok(())
    }
}
