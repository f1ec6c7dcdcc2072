//! The key-value seam between domain logic and the device store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;

/// Raw string storage. Implementations report failures through
/// [`StoreError`](crate::StoreError); the adapter above them swallows those.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Outcome of a read that keeps "absent" and "failed" apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Found(T),
    Missing,
    Failed,
}

impl<T> Fetched<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Fetched::Found(v) => Some(v),
            Fetched::Missing | Fetched::Failed => None,
        }
    }
}

/// JSON layer over a [`KeyValueStore`].
///
/// Values are serialized on write and deserialized on read. Backend errors
/// and malformed documents are logged and come back as `None` / `false`;
/// callers never see an error from this type.
#[derive(Clone)]
pub struct StoreAdapter {
    backend: Arc<dyn KeyValueStore>,
}

impl StoreAdapter {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.fetch(key).await.ok()
    }

    /// Like [`get`](Self::get) but tells a missing key from a failed read,
    /// so read-modify-write callers can avoid overwriting data they could
    /// not load.
    pub async fn fetch<T: DeserializeOwned>(&self, key: &str) -> Fetched<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Fetched::Missing,
            Err(e) => {
                warn!(key, error = %e, "store read failed");
                return Fetched::Failed;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Fetched::Found(value),
            Err(e) => {
                warn!(key, error = %e, "stored value could not be decoded");
                Fetched::Failed
            }
        }
    }

    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "value could not be encoded");
                return false;
            }
        };

        let len = json.len();
        match self.backend.set(key, json).await {
            Ok(()) => {
                debug!(key, bytes = len, "stored value");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "store write failed");
                false
            }
        }
    }

    pub async fn remove(&self, key: &str) -> bool {
        match self.backend.remove(key).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "store remove failed");
                false
            }
        }
    }
}
