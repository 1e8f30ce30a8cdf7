use crate::core::{AppError, Result, StoreTimezone};
use std::env;

pub mod server;
pub mod storage;

pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub utc_offset_hours: i32,
    /// Minutes an untouched cart is kept before it expires
    pub cart_ttl_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub session_ttl_hours: u32,
    pub login_rate_limit_per_minute: u32,
}

impl AppConfig {
    pub fn timezone(&self) -> Result<StoreTimezone> {
        StoreTimezone::from_offset_hours(self.utc_offset_hours)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
                log_format: match env::var("LOG_FORMAT").as_deref() {
                    Ok("json") => LogFormat::Json,
                    _ => LogFormat::Pretty,
                },
                utc_offset_hours: env::var("STORE_UTC_OFFSET_HOURS")
                    .unwrap_or_else(|_| "7".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid STORE_UTC_OFFSET_HOURS".to_string())
                    })?,
                cart_ttl_minutes: env::var("CART_TTL_MINUTES")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()
                    .map_err(|_| AppError::Configuration("Invalid CART_TTL_MINUTES".to_string()))?,
            },
            storage: StorageConfig::from_env()?,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                session_ttl_hours: env::var("SESSION_TTL_HOURS")
                    .unwrap_or_else(|_| "12".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid SESSION_TTL_HOURS".to_string())
                    })?,
                login_rate_limit_per_minute: env::var("LOGIN_RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid LOGIN_RATE_LIMIT_PER_MINUTE".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.app.timezone()?;
        self.storage.validate()?;

        if self.app.cart_ttl_minutes == 0 {
            return Err(AppError::Configuration(
                "Cart TTL must be greater than 0".to_string(),
            ));
        }

        if self.security.session_ttl_hours == 0 {
            return Err(AppError::Configuration(
                "Session TTL must be greater than 0".to_string(),
            ));
        }

        if self.security.login_rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Login rate limit must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "SERVER_WORKERS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
