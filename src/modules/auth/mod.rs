pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{LoginRequest, LoginResponse, Session};
pub use repositories::SessionRepository;
pub use services::AuthService;
