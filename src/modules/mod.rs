pub mod auth;
pub mod carts;
pub mod health;
pub mod products;
pub mod reports;
pub mod settings;
pub mod taxes;
pub mod transactions;
pub mod users;
