use serde::Deserialize;

use crate::error::AppError;

use super::shared::{NAME_MAX, validate_text};

#[derive(Debug, Deserialize)]
pub struct CreateClub {
    pub name: String,
    pub pavilion_id: i32,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct UpdateClub {
    pub name: Option<String>,
    pub pavilion_id: Option<i32>,
}

pub fn validate_create_club(payload: &CreateClub) -> Result<(), AppError> {
    validate_text("Name", &payload.name, NAME_MAX)
}

pub fn validate_update_club(payload: &UpdateClub) -> Result<(), AppError> {
    if let Some(ref name) = payload.name {
        validate_text("Name", name, NAME_MAX)?;
    }
    Ok(())
}
