//! The domain repository handle.
//!
//! Operations are spread over [`users`](crate::users),
//! [`complaints`](crate::complaints), [`staff`](crate::staff),
//! [`session`](crate::session) and [`seed`](crate::seed) as `impl Repository`
//! blocks. Each write loads a whole collection, changes it in memory and
//! stores it back.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use hostelcare_shared::error::Result;
use hostelcare_shared::HostelError;

use crate::kv::{Fetched, KeyValueStore, StoreAdapter};

/// Behaviour switches for a [`Repository`].
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfig {
    /// Let any non-empty email/password log in as the built-in demo warden.
    /// There is no real warden authentication in this mode.
    pub demo_warden_login: bool,
}

#[derive(Clone)]
pub struct Repository {
    store: StoreAdapter,
    config: RepositoryConfig,
}

impl Repository {
    pub fn new(backend: Arc<dyn KeyValueStore>, config: RepositoryConfig) -> Self {
        Self {
            store: StoreAdapter::new(backend),
            config,
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub(crate) fn store(&self) -> &StoreAdapter {
        &self.store
    }

    /// Read a collection for display. Missing or unreadable data shows as
    /// an empty list.
    pub(crate) async fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.store.get(key).await.unwrap_or_default()
    }

    /// Read a collection that is about to be written back. A failed read
    /// aborts the operation so the write cannot clobber data we never saw.
    pub(crate) async fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.fetch(key).await {
            Fetched::Found(items) => Ok(items),
            Fetched::Missing => Ok(Vec::new()),
            Fetched::Failed => {
                error!(key, "could not load collection");
                Err(HostelError::StorageFailure(format!("could not read {key}")))
            }
        }
    }

    pub(crate) async fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        if self.store.set(key, items).await {
            Ok(())
        } else {
            error!(key, "could not save collection");
            Err(HostelError::StorageFailure(format!("could not write {key}")))
        }
    }
}
