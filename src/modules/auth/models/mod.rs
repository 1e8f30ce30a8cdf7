pub mod session;

pub use session::{LoginRequest, LoginResponse, Session, SessionUser};
