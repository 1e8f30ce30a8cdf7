pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{User, UserInput, UserResponse, UserRole};
pub use repositories::UserRepository;
pub use services::UserService;
