//! In-process person store backed by a `HashMap` behind an async `RwLock`.

use crate::domain::{Person, PersonChanges};
use crate::storage::{PersonStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryPersonStore {
    persons: RwLock<HashMap<Uuid, Person>>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.persons.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.persons.read().await.is_empty()
    }
}

fn email_taken(persons: &HashMap<Uuid, Person>, email: &str, except: Option<Uuid>) -> bool {
    persons
        .values()
        .any(|p| p.email == email && Some(p.id) != except)
}

#[async_trait]
impl PersonStore for InMemoryPersonStore {
    async fn insert(&self, person: Person) -> Result<Person, StoreError> {
        // Scan and insert under one write guard so two inserts cannot both pass the check.
        let mut persons = self.persons.write().await;
        if email_taken(&persons, &person.email, None) {
            return Err(StoreError::DuplicateEmail(person.email));
        }
        persons.insert(person.id, person.clone());
        Ok(person)
    }

    async fn find_all(&self) -> Result<Vec<Person>, StoreError> {
        Ok(self.persons.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, StoreError> {
        Ok(self.persons.read().await.get(&id).cloned())
    }

    async fn apply_update(
        &self,
        id: Uuid,
        changes: &PersonChanges,
    ) -> Result<Option<Person>, StoreError> {
        let mut persons = self.persons.write().await;
        if !persons.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = &changes.email {
            if email_taken(&persons, email, Some(id)) {
                return Err(StoreError::DuplicateEmail(email.clone()));
            }
        }
        let Some(stored) = persons.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(stored);
        Ok(Some(stored.clone()))
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.persons.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
