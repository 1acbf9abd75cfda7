//! Persistence for league entities and their image artifacts.
//!
//! Entities owning an image keep the artifact location in their `image`
//! column. Each entity's artifacts live in their own folder,
//! `{kind}s/{id}`, so ingesting for one entity never touches another.

pub mod club;
pub mod game;
pub mod pavilion;

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use tracing::debug;

use crate::entity;
use crate::error::AppError;
use crate::models::ImageUpload;
use crate::state::AppState;

pub use club::*;
pub use game::*;
pub use pavilion::*;

/// Storage folder holding the artifacts of one entity.
pub(crate) fn image_folder(kind: &str, id: i32) -> String {
    format!("{kind}s/{id}")
}

pub(crate) async fn ingest_image(
    state: &AppState,
    kind: &str,
    id: i32,
    upload: &ImageUpload,
) -> Result<String, AppError> {
    debug!(filename = ?upload.filename, bytes = upload.data.len(), "Ingesting {kind} image");
    let location = state
        .images
        .ingest(&upload.data, &image_folder(kind, id))
        .await?;
    Ok(location)
}

pub(crate) async fn replace_image(
    state: &AppState,
    kind: &str,
    id: i32,
    upload: &ImageUpload,
) -> Result<String, AppError> {
    debug!(filename = ?upload.filename, bytes = upload.data.len(), "Replacing {kind} image");
    let location = state
        .images
        .replace(&upload.data, &image_folder(kind, id))
        .await?;
    Ok(location)
}

/// Remove the artifact at `location`. Entities without an image are skipped.
pub(crate) async fn remove_image(state: &AppState, location: &str) -> Result<(), AppError> {
    if location.is_empty() {
        return Ok(());
    }
    state.images.remove(location).await?;
    Ok(())
}

pub(crate) async fn ensure_pavilion_exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), AppError> {
    let count = entity::pavilion::Entity::find_by_id(id).count(db).await?;
    if count == 0 {
        return Err(AppError::NotFound("Pavilion not found".into()));
    }
    Ok(())
}

pub(crate) async fn ensure_club_exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), AppError> {
    let count = entity::club::Entity::find_by_id(id).count(db).await?;
    if count == 0 {
        return Err(AppError::NotFound("Club not found".into()));
    }
    Ok(())
}
