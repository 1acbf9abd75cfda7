use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the image pipeline. None of them are retried internally.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The bytes could not be decoded as an image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The image decoded fine but its format is not accepted.
    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),

    #[error("Invalid folder: {0}")]
    InvalidFolder(&'static str),

    /// The location does not belong to the configured store.
    #[error("Invalid image location: {0}")]
    InvalidLocation(String),

    #[error("Image exceeds size limit ({actual} > {limit} bytes)")]
    TooLarge { actual: u64, limit: u64 },

    /// The artifact was expected but is missing (strict delete).
    #[error("Image file not found: {0}")]
    FileNotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Image encoding failed: {0}")]
    Encoding(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ImageError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => Self::StorageUnavailable(msg),
            StorageError::NotFound(key) => Self::FileNotFound(key),
            other => Self::Storage(other),
        }
    }
}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        Self::InvalidImage(err.to_string())
    }
}
