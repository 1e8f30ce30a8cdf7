pub mod transaction;

pub use transaction::{
    CheckoutRequest, CheckoutSummary, QuoteRequest, Quote, Transaction, DEFAULT_CUSTOMER_NAME,
};
