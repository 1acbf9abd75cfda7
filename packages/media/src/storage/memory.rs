use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::key::validate_key;
use super::traits::ObjectStore;

/// In-process object store with URL-style locations (`{base_url}/{key}`).
///
/// Behaves like a bucket: listing is by key prefix, and deleting a missing
/// key is reported as `false` rather than failing. Intended for tests and
/// local development.
pub struct MemoryStore {
    base_url: String,
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(BTreeMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail with [`StorageError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    fn check(&self, key: &str) -> Result<String, StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store is offline".into()));
        }
        validate_key(key)
            .map(str::to_string)
            .map_err(|e| StorageError::InvalidKey(e.into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("memory://objects")
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let key = self.check(key)?;
        let location = self.location(&key);
        self.objects.write().await.insert(key, data.to_vec());
        Ok(location)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let key = self.check(key)?;
        self.objects
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or(StorageError::NotFound(key))
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let key = self.check(key)?;
        Ok(self.objects.write().await.remove(&key).is_some())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let prefix = format!("{}/", self.check(prefix)?);
        Ok(self
            .objects
            .read()
            .await
            .keys()
            .filter(|k| {
                k.strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.contains('/'))
            })
            .cloned()
            .collect())
    }

    fn location(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }

    fn key_from_location(&self, location: &str) -> Option<String> {
        let key = location.trim().strip_prefix(&self.base_url)?.strip_prefix('/')?;
        validate_key(key).ok().map(str::to_string)
    }
}
