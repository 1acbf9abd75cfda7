use serde::Deserialize;

use crate::error::AppError;

use super::shared::{LOCATION_MAX, NAME_MAX, double_option, validate_link, validate_text};

#[derive(Debug, Deserialize)]
pub struct CreatePavilion {
    pub name: String,
    pub location: String,
    pub location_link: Option<String>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct UpdatePavilion {
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub location_link: Option<Option<String>>,
}

pub fn validate_create_pavilion(payload: &CreatePavilion) -> Result<(), AppError> {
    validate_text("Name", &payload.name, NAME_MAX)?;
    validate_text("Location", &payload.location, LOCATION_MAX)?;
    if let Some(ref link) = payload.location_link {
        validate_link("Location link", link)?;
    }
    Ok(())
}

pub fn validate_update_pavilion(payload: &UpdatePavilion) -> Result<(), AppError> {
    if let Some(ref name) = payload.name {
        validate_text("Name", name, NAME_MAX)?;
    }
    if let Some(ref location) = payload.location {
        validate_text("Location", location, LOCATION_MAX)?;
    }
    if let Some(Some(ref link)) = payload.location_link {
        validate_link("Location link", link)?;
    }
    Ok(())
}
