pub mod controllers;
pub mod models;
pub mod services;

pub use models::{ReportPeriod, SalesReport};
pub use services::ReportService;
