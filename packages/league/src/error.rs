use media::ImageError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error body for whatever transport wraps the library.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `INVALID_IMAGE`,
    /// `INVALID_IMAGE_FORMAT`, `IMAGE_NOT_FOUND`, `NOT_FOUND`, `CONFLICT`,
    /// `STORAGE_UNAVAILABLE`, `INTERNAL_ERROR`.
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    /// Decodable image in a format that is not accepted. Contains the format name.
    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),
    /// The entity's artifact was already gone when it had to be removed.
    #[error("Image not found: {0}")]
    ImageNotFound(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_and_body(self) -> (u16, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                400,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::InvalidImage(_) => (
                400,
                ErrorBody {
                    code: "INVALID_IMAGE",
                    message: "Uploaded file is not a valid image".into(),
                },
            ),
            AppError::InvalidImageFormat(format) => (
                400,
                ErrorBody {
                    code: "INVALID_IMAGE_FORMAT",
                    message: format!("Image format {format} is not accepted"),
                },
            ),
            AppError::ImageNotFound(location) => (
                400,
                ErrorBody {
                    code: "IMAGE_NOT_FOUND",
                    message: format!("Image file {location} does not exist"),
                },
            ),
            AppError::NotFound(msg) => (
                404,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                409,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::StorageUnavailable(detail) => {
                tracing::error!("Image storage unavailable: {}", detail);
                (
                    503,
                    ErrorBody {
                        code: "STORAGE_UNAVAILABLE",
                        message: "Image storage is unavailable".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    500,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::InvalidImage(detail) => {
                tracing::warn!("Rejected upload: {detail}");
                AppError::InvalidImage(detail)
            }
            ImageError::InvalidImageFormat(format) => AppError::InvalidImageFormat(format),
            ImageError::TooLarge { .. } => AppError::Validation(err.to_string()),
            ImageError::FileNotFound(location) => AppError::ImageNotFound(location),
            ImageError::StorageUnavailable(detail) => AppError::StorageUnavailable(detail),
            other => AppError::Internal(other.to_string()),
        }
    }
}
