//! Storage backends for persons.
//!
//! Both backends implement [`PersonStore`]; the service only ever sees the trait object.

pub mod memory;
pub mod postgres;
pub mod unit_of_work;

pub use memory::InMemoryPersonStore;
pub use postgres::PostgresPersonStore;
pub use unit_of_work::UnitOfWork;

use crate::domain::{Person, PersonChanges};
use crate::infra::config::{Settings, StorageKind};
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a person with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(anyhow::Error::new(err))
    }
}

/// Contract every storage backend satisfies. Each call is independent and atomic.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Persists a new record. Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    async fn insert(&self, person: Person) -> Result<Person, StoreError>;

    async fn find_all(&self) -> Result<Vec<Person>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, StoreError>;

    /// Overwrites the supplied columns. Returns `None` when `id` does not exist.
    async fn apply_update(
        &self,
        id: Uuid,
        changes: &PersonChanges,
    ) -> Result<Option<Person>, StoreError>;

    /// Returns whether a record was removed.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Trivial connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}

/// Builds the backend selected by `settings`.
pub async fn connect(settings: &Settings) -> anyhow::Result<Arc<dyn PersonStore>> {
    match settings.storage {
        StorageKind::Memory => Ok(Arc::new(InMemoryPersonStore::new())),
        StorageKind::Postgres => {
            let url = settings
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow!("DATABASE_URL must be set for the postgres backend"))?;
            let store =
                PostgresPersonStore::connect(url, settings.database_max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}
