use async_trait::async_trait;

use super::error::StorageError;

/// Key-addressed object storage for image artifacts.
///
/// Keys are `/`-separated, relative, and already validated by the caller
/// (see [`validate_key`](super::key::validate_key)). A store hands back a
/// *location* for every key it writes: what gets persisted on the owning row
/// and later passed back to [`key_from_location`](ObjectStore::key_from_location).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any previous object, and return its location.
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Retrieve all bytes stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Delete the object under `key`.
    ///
    /// Returns `true` if an object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// List the keys of all objects directly under `prefix`.
    ///
    /// A prefix with no objects (or a folder that was never created) yields an empty list.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.get(key).await {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// The location handed out for `key`.
    fn location(&self, key: &str) -> String;

    /// Inverse of [`location`](ObjectStore::location). `None` if the location
    /// does not belong to this store.
    fn key_from_location(&self, location: &str) -> Option<String>;
}
