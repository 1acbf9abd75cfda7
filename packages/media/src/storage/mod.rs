mod error;
mod hash;
mod traits;

#[cfg(feature = "object-storage")]
pub mod bucket;
pub mod filesystem;
pub mod key;
pub mod memory;

use std::sync::Arc;

use tracing::info;

pub use error::StorageError;
pub use hash::ContentHash;
pub use traits::ObjectStore;

use crate::config::{StorageBackend, StorageConfig};

/// Build the object store selected by `config`.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        StorageBackend::Filesystem => {
            let store = filesystem::FilesystemStore::new(config.filesystem.root.clone()).await?;
            info!(root = %config.filesystem.root.display(), "Using filesystem image storage");
            Ok(Arc::new(store))
        }
        StorageBackend::Bucket => open_bucket(config),
        StorageBackend::Memory => {
            info!("Using in-memory image storage");
            Ok(Arc::new(memory::MemoryStore::default()))
        }
    }
}

#[cfg(feature = "object-storage")]
fn open_bucket(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    let store = bucket::BucketStore::new(&config.bucket)?;
    info!(
        bucket = %config.bucket.name,
        public_base = %store.public_base(),
        "Using bucket image storage"
    );
    Ok(Arc::new(store))
}

#[cfg(not(feature = "object-storage"))]
fn open_bucket(_config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    Err(StorageError::Unavailable(
        "bucket storage requires the `object-storage` feature".into(),
    ))
}
