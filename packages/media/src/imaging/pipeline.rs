use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::error::ImageError;
use super::normalize::{NormalizedImage, normalize};
use crate::config::StorageConfig;
use crate::storage::key::{artifact_key, is_artifact_key, validate_key};
use crate::storage::{self, ContentHash, ObjectStore};

const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Tunables of the ingestion pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// JPEG quality of stored artifacts (1-100).
    pub jpeg_quality: u8,
    /// Largest accepted upload in bytes.
    pub max_upload_size: u64,
    /// Whether [`ImagePipeline::remove`] fails when the artifact is already gone.
    pub strict_delete: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&StorageConfig::default())
    }
}

impl From<&StorageConfig> for PipelineOptions {
    fn from(config: &StorageConfig) -> Self {
        Self {
            jpeg_quality: config.jpeg_quality,
            max_upload_size: config.max_upload_size,
            strict_delete: config.strict_delete(),
        }
    }
}

/// Turns uploads into content-addressed JPEG artifacts on an [`ObjectStore`].
///
/// Every artifact lives at `{folder}/{md5(upload)}.jpg`, where the folder is
/// scoped to one owning entity (`clubs/42`). Identical uploads to the same
/// folder land on the same key; nothing is shared across folders.
#[derive(Clone)]
pub struct ImagePipeline {
    store: Arc<dyn ObjectStore>,
    options: PipelineOptions,
}

struct PreparedArtifact {
    hash: ContentHash,
    image: NormalizedImage,
}

impl ImagePipeline {
    pub fn new(store: Arc<dyn ObjectStore>, options: PipelineOptions) -> Self {
        Self { store, options }
    }

    /// Open the configured store and build a pipeline over it.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, ImageError> {
        let store = storage::open(config).await?;
        Ok(Self::new(store, PipelineOptions::from(config)))
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Normalize `data` and store it under `folder`. Returns the artifact location.
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn ingest(&self, data: &[u8], folder: &str) -> Result<String, ImageError> {
        let folder = checked_folder(folder)?;
        let artifact = self.prepare(data).await?;
        self.persist(folder, artifact).await
    }

    /// Like [`ingest`](Self::ingest), but first deletes every artifact already
    /// stored under `folder`.
    ///
    /// The upload is validated before anything is deleted, so a rejected
    /// upload leaves the current artifact in place.
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn replace(&self, data: &[u8], folder: &str) -> Result<String, ImageError> {
        let folder = checked_folder(folder)?;
        let artifact = self.prepare(data).await?;

        let removed = self.clear(folder).await?;
        if removed > 0 {
            debug!(folder, removed, "Removed superseded artifacts");
        }

        self.persist(folder, artifact).await
    }

    /// Delete all artifacts under `folder`, returning how many were removed.
    ///
    /// A folder that was never written to has zero artifacts.
    pub async fn clear(&self, folder: &str) -> Result<usize, ImageError> {
        let folder = checked_folder(folder)?;
        let mut removed = 0;
        for key in self.store.list(folder).await? {
            if !is_artifact_key(&key) {
                continue;
            }
            if self.store.delete(&key).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Delete the artifact at a location previously returned by this pipeline.
    #[instrument(skip(self))]
    pub async fn remove(&self, location: &str) -> Result<(), ImageError> {
        let key = self
            .store
            .key_from_location(location)
            .ok_or_else(|| ImageError::InvalidLocation(location.to_string()))?;

        if self.store.delete(&key).await? {
            info!(key = %key, "Removed image artifact");
            return Ok(());
        }

        if self.options.strict_delete {
            warn!(key = %key, "Image artifact missing at deletion time");
            return Err(ImageError::FileNotFound(location.to_string()));
        }

        debug!(key = %key, "Image artifact already absent");
        Ok(())
    }

    /// Size check, hash and normalization. Performs no storage access.
    async fn prepare(&self, data: &[u8]) -> Result<PreparedArtifact, ImageError> {
        let size = data.len() as u64;
        if size > self.options.max_upload_size {
            return Err(ImageError::TooLarge {
                actual: size,
                limit: self.options.max_upload_size,
            });
        }

        let hash = ContentHash::compute(data);
        let owned = data.to_vec();
        let quality = self.options.jpeg_quality;
        let image = tokio::task::spawn_blocking(move || normalize(&owned, quality))
            .await
            .map_err(|e| ImageError::Internal(format!("image task failed: {e}")))??;

        debug!(
            hash = %hash,
            source_format = ?image.source_format,
            width = image.width,
            height = image.height,
            "Normalized upload"
        );
        Ok(PreparedArtifact { hash, image })
    }

    async fn persist(&self, folder: &str, artifact: PreparedArtifact) -> Result<String, ImageError> {
        let key = artifact_key(folder, &artifact.hash);
        let location = self
            .store
            .put(&key, &artifact.image.jpeg, JPEG_CONTENT_TYPE)
            .await?;
        info!(key = %key, location = %location, "Stored image artifact");
        Ok(location)
    }
}

fn checked_folder(folder: &str) -> Result<&str, ImageError> {
    validate_key(folder).map_err(ImageError::InvalidFolder)
}
