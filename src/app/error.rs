use crate::storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("No fields to update")]
    EmptyUpdate,

    #[error("Person with email {0} already exists")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(anyhow::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => ServiceError::Conflict(email),
            StoreError::Backend(err) => ServiceError::Storage(err),
        }
    }
}
