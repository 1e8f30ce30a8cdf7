use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use rust_decimal::Decimal;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request conflicts with current state (e.g. duplicate username)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested quantity exceeds the catalog stock of a product
    #[error("Insufficient stock for {product}: {available} left, {requested} requested")]
    InsufficientStock {
        product: String,
        available: i32,
        requested: i32,
    },

    /// Cash tendered does not cover the checkout total
    #[error("Insufficient cash: total is {total}, received {cash}")]
    InsufficientCash { total: Decimal, cash: Decimal },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage backend errors (file or in-memory)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        // Storage internals are logged, not returned to the client
        let error_message = match self {
            AppError::Database(_) | AppError::Io(_) | AppError::Storage(_) => {
                tracing::error!(error = %self, "Storage failure");
                "Storage operation failed".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InsufficientStock { .. } => StatusCode::CONFLICT,
            AppError::InsufficientCash { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn insufficient_stock(product: impl Into<String>, available: i32, requested: i32) -> Self {
        AppError::InsufficientStock {
            product: product.into(),
            available,
            requested,
        }
    }
}
