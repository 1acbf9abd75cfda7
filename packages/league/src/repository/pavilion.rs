use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::{info, instrument};

use super::{ingest_image, remove_image, replace_image};
use crate::entity::{club, game, pavilion};
use crate::error::AppError;
use crate::models::ImageUpload;
use crate::models::pavilion::*;
use crate::state::AppState;

const KIND: &str = "pavilion";

/// Insert a pavilion and ingest its image in one transaction.
#[instrument(skip(state, payload, upload), fields(name = %payload.name))]
pub async fn create_pavilion(
    state: &AppState,
    payload: CreatePavilion,
    upload: ImageUpload,
) -> Result<pavilion::Model, AppError> {
    validate_create_pavilion(&payload)?;

    let txn = state.db.begin().await?;

    let new_pavilion = pavilion::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        location: Set(payload.location.trim().to_string()),
        location_link: Set(payload.location_link.map(|l| l.trim().to_string())),
        image: Set(String::new()),
        ..Default::default()
    };
    let model = new_pavilion.insert(&txn).await?;

    let location = ingest_image(state, KIND, model.id, &upload).await?;
    let mut active: pavilion::ActiveModel = model.into();
    active.image = Set(location);
    let model = active.update(&txn).await?;

    txn.commit().await?;
    info!(id = model.id, "Created pavilion");
    Ok(model)
}

#[instrument(skip(db))]
pub async fn get_pavilion<C: ConnectionTrait>(db: &C, id: i32) -> Result<pavilion::Model, AppError> {
    pavilion::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Pavilion not found".into()))
}

pub async fn list_pavilions<C: ConnectionTrait>(db: &C) -> Result<Vec<pavilion::Model>, AppError> {
    let pavilions = pavilion::Entity::find()
        .order_by_asc(pavilion::Column::Name)
        .order_by_asc(pavilion::Column::Id)
        .all(db)
        .await?;
    Ok(pavilions)
}

/// Apply a partial update. A new image replaces every artifact of the pavilion.
#[instrument(skip(state, payload, upload), fields(id))]
pub async fn update_pavilion(
    state: &AppState,
    id: i32,
    payload: UpdatePavilion,
    upload: Option<ImageUpload>,
) -> Result<pavilion::Model, AppError> {
    validate_update_pavilion(&payload)?;

    if payload == UpdatePavilion::default() && upload.is_none() {
        return get_pavilion(&state.db, id).await;
    }

    let txn = state.db.begin().await?;

    let existing = find_pavilion_for_update(&txn, id).await?;
    let mut active: pavilion::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref location) = payload.location {
        active.location = Set(location.trim().to_string());
    }
    match payload.location_link {
        Some(Some(link)) => active.location_link = Set(Some(link.trim().to_string())),
        Some(None) => active.location_link = Set(None),
        None => {}
    }
    if let Some(ref upload) = upload {
        active.image = Set(replace_image(state, KIND, id, upload).await?);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

/// Delete a pavilion and its image. Fails with `Conflict` while clubs or
/// games still reference it.
#[instrument(skip(state), fields(id))]
pub async fn delete_pavilion(state: &AppState, id: i32) -> Result<(), AppError> {
    let txn = state.db.begin().await?;

    let existing = find_pavilion_for_update(&txn, id).await?;

    let club_count = club::Entity::find()
        .filter(club::Column::PavilionId.eq(id))
        .count(&txn)
        .await?;
    if club_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete pavilion used as a club's home".into(),
        ));
    }

    let game_count = game::Entity::find()
        .filter(game::Column::PavilionId.eq(id))
        .count(&txn)
        .await?;
    if game_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete pavilion with scheduled games".into(),
        ));
    }

    remove_image(state, &existing.image).await?;
    pavilion::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    info!(id, "Deleted pavilion");
    Ok(())
}

async fn find_pavilion_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<pavilion::Model, AppError> {
    pavilion::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Pavilion not found".into()))
}
