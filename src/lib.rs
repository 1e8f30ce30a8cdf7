//! UMKM point-of-sale backend
//!
//! Catalog, cart and cash checkout for a small shop, with transaction
//! history, sales reports, receipts, users and store settings.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod storage;

pub use app::AppState;
pub use config::Config;
