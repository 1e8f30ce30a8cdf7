pub mod product;

pub use product::{seed_products, Product, ProductCategory, ProductInput, DEFAULT_IMAGE};
