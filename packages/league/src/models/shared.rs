use serde::{Deserialize, Deserializer};

use crate::error::AppError;

pub const NAME_MAX: usize = 200;
pub const LOCATION_MAX: usize = 264;
pub const LINK_MAX: usize = 2048;

/// Raw image bytes as received, with the client-declared filename if any.
///
/// The filename is informational only; the format is judged from content.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: Option<String>, data: Vec<u8>) -> Self {
        Self { filename, data }
    }
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * field absent  => `None`          (don't update)
/// * field = null  => `Some(None)`    (set to NULL)
/// * field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a trimmed, required text field of at most `max` characters.
pub fn validate_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional link (at most [`LINK_MAX`] characters, http or https).
pub fn validate_link(field: &str, value: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.chars().count() > LINK_MAX {
        return Err(AppError::Validation(format!(
            "{field} must be at most {LINK_MAX} characters"
        )));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(AppError::Validation(format!("{field} must be an http(s) URL")));
    }
    Ok(())
}
