use crate::storage::PersonStore;

/// Outcome of a single connectivity probe against the storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageHealth {
    pub healthy: bool,
    pub backend: &'static str,
    pub error: Option<String>,
}

impl StorageHealth {
    pub fn status(&self) -> &'static str {
        if self.healthy {
            "healthy"
        } else {
            "unhealthy"
        }
    }

    pub fn connection(&self) -> &'static str {
        if self.healthy {
            "connected"
        } else {
            "disconnected"
        }
    }
}

/// Pings the store. Failures are reported, never propagated.
pub async fn check_storage(store: &dyn PersonStore) -> StorageHealth {
    match store.ping().await {
        Ok(()) => StorageHealth {
            healthy: true,
            backend: store.backend(),
            error: None,
        },
        Err(e) => {
            tracing::warn!(backend = store.backend(), error = %e, "storage health probe failed");
            StorageHealth {
                healthy: false,
                backend: store.backend(),
                error: Some(e.to_string()),
            }
        }
    }
}
