pub mod repository;
pub mod service;

pub use repository::{paginate, Repository};
pub use service::Service;
