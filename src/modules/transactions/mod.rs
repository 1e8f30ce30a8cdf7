pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CheckoutRequest, Transaction};
pub use repositories::TransactionRepository;
pub use services::{CheckoutCalculator, CheckoutService, HistoryService, TransactionFilter};
