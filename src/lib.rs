pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{PersonService, ServiceError};
pub use domain::{NewPerson, Patch, Person, PersonUpdate};
pub use infra::Settings;
pub use storage::{InMemoryPersonStore, PersonStore, PostgresPersonStore, StoreError};
