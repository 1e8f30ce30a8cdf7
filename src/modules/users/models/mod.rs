pub mod user;

pub use user::{seed_users, User, UserInput, UserQuery, UserResponse, UserRole, MAIN_ADMIN};
