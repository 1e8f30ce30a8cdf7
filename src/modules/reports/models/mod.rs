pub mod sales_report;

pub use sales_report::{DailySales, ProductSales, ReportPeriod, ReportQuery, SalesReport, TOP_PRODUCTS};
