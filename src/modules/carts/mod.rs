pub mod controllers;
pub mod models;
pub mod services;

pub use models::{Cart, CartItem, CartView};
pub use services::CartService;
