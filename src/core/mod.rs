pub mod currency;
pub mod error;
pub mod timezone;
pub mod traits;

pub use currency::Currency;
pub use error::{AppError, Result};
pub use timezone::StoreTimezone;
