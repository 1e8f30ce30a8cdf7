pub mod auth;
pub mod error_handler;
pub mod rate_limit;
pub mod request_id;

pub use auth::{bearer_token, hash_password, hash_token, verify_password, CurrentUser};
pub use error_handler::{json_config, path_config, query_config};
pub use rate_limit::RateLimiter;
pub use request_id::{RequestId, RequestIdValue, REQUEST_ID_HEADER};
