use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, HttpRequest,
};

use crate::core::AppError;

/// Map malformed JSON bodies to the standard error body
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected JSON payload");
    AppError::validation(format!("Invalid request body: {}", err)).into()
}

/// Map malformed query strings to the standard error body
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected query string");
    AppError::validation(format!("Invalid query string: {}", err)).into()
}

/// Map unparsable path segments (e.g. a non-numeric id) to the standard error body
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected path parameters");
    AppError::validation(format!("Invalid path: {}", err)).into()
}

/// Extractor configs wired with the handlers above
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
