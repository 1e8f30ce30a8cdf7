pub mod catalog_query;
pub mod product_service;

pub use catalog_query::{ProductFilter, ProductQuery};
pub use product_service::ProductService;
