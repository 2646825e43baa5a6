pub mod error;
pub mod health;
pub mod person_service;

pub use error::ServiceError;
pub use health::{check_storage, StorageHealth};
pub use person_service::PersonService;
