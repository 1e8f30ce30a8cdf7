pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Product, ProductCategory, ProductInput};
pub use repositories::ProductRepository;
pub use services::{ProductFilter, ProductService};
