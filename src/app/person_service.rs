//! The person service.
//!
//! Sits between the HTTP handlers and a [`PersonStore`]:
//! 1.  Validates request payloads before any storage call, so a rejected request never writes.
//! 2.  Assigns identifiers to new persons.
//! 3.  Turns partial updates into column changes and maps storage failures to [`ServiceError`].

use crate::app::error::ServiceError;
use crate::app::health::{check_storage, StorageHealth};
use crate::domain::{NewPerson, Person, PersonUpdate};
use crate::storage::PersonStore;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct PersonService {
    store: Arc<dyn PersonStore>,
}

impl PersonService {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NewPerson) -> Result<Person, ServiceError> {
        input.validate()?;

        let person = input.into_person(Uuid::new_v4());
        let stored = self.store.insert(person).await.map_err(|e| {
            let err = ServiceError::from(e);
            log_failure("create", &err);
            err
        })?;

        tracing::info!(person_id = %stored.id, "person created");
        Ok(stored)
    }

    pub async fn list(&self) -> Result<Vec<Person>, ServiceError> {
        let persons = self.store.find_all().await.map_err(|e| {
            let err = ServiceError::from(e);
            log_failure("list", &err);
            err
        })?;
        tracing::debug!(count = persons.len(), "listed persons");
        Ok(persons)
    }

    /// Ids that are not valid UUIDs are reported as absent.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Person>, ServiceError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        self.store.find_by_id(id).await.map_err(|e| {
            let err = ServiceError::from(e);
            log_failure("get_by_id", &err);
            err
        })
    }

    /// Applies only the fields present in `patch`. Returns `Ok(None)` if the person is unknown.
    pub async fn update(
        &self,
        id: &str,
        patch: PersonUpdate,
    ) -> Result<Option<Person>, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::EmptyUpdate);
        }
        let changes = patch.into_changes()?;

        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let updated = self.store.apply_update(id, &changes).await.map_err(|e| {
            let err = ServiceError::from(e);
            log_failure("update", &err);
            err
        })?;

        if let Some(person) = &updated {
            tracing::info!(person_id = %person.id, "person updated");
        }
        Ok(updated)
    }

    /// Returns whether a person was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let removed = self.store.remove(id).await.map_err(|e| {
            let err = ServiceError::from(e);
            log_failure("delete", &err);
            err
        })?;
        if removed {
            tracing::info!(person_id = %id, "person deleted");
        }
        Ok(removed)
    }

    pub async fn health(&self) -> StorageHealth {
        check_storage(self.store.as_ref()).await
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

fn log_failure(operation: &str, err: &ServiceError) {
    match err {
        ServiceError::Storage(e) => tracing::error!(operation, error = ?e, "storage failure"),
        other => tracing::info!(operation, error = %other, "request rejected"),
    }
}
