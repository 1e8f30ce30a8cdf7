pub mod checkout_calculator;
pub mod checkout_service;
pub mod history_query;
pub mod history_service;
pub mod receipt;

pub use checkout_calculator::{CheckoutCalculator, Settlement};
pub use checkout_service::CheckoutService;
pub use history_query::{DateRange, HistoryQuery, Page, TransactionFilter, PAGE_SIZE};
pub use history_service::HistoryService;
pub use receipt::ReceiptRenderer;
