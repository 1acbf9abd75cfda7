use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::{info, instrument};

use super::{ensure_pavilion_exists, ingest_image, remove_image, replace_image};
use crate::entity::{club, game, pavilion};
use crate::error::AppError;
use crate::models::ImageUpload;
use crate::models::club::*;
use crate::state::AppState;

const KIND: &str = "club";

/// Insert a club and ingest its crest in one transaction.
#[instrument(skip(state, payload, upload), fields(name = %payload.name))]
pub async fn create_club(
    state: &AppState,
    payload: CreateClub,
    upload: ImageUpload,
) -> Result<club::Model, AppError> {
    validate_create_club(&payload)?;

    let txn = state.db.begin().await?;
    ensure_pavilion_exists(&txn, payload.pavilion_id).await?;

    let new_club = club::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        image: Set(String::new()),
        pavilion_id: Set(payload.pavilion_id),
        ..Default::default()
    };
    let model = new_club.insert(&txn).await?;

    let location = ingest_image(state, KIND, model.id, &upload).await?;
    let mut active: club::ActiveModel = model.into();
    active.image = Set(location);
    let model = active.update(&txn).await?;

    txn.commit().await?;
    info!(id = model.id, "Created club");
    Ok(model)
}

#[instrument(skip(db))]
pub async fn get_club<C: ConnectionTrait>(db: &C, id: i32) -> Result<club::Model, AppError> {
    club::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Club not found".into()))
}

pub async fn list_clubs<C: ConnectionTrait>(db: &C) -> Result<Vec<club::Model>, AppError> {
    let clubs = club::Entity::find()
        .order_by_asc(club::Column::Name)
        .order_by_asc(club::Column::Id)
        .all(db)
        .await?;
    Ok(clubs)
}

/// The home pavilion of a club.
#[instrument(skip(db))]
pub async fn get_club_pavilion<C: ConnectionTrait>(
    db: &C,
    club_id: i32,
) -> Result<pavilion::Model, AppError> {
    let club = get_club(db, club_id).await?;
    pavilion::Entity::find_by_id(club.pavilion_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Pavilion not found".into()))
}

/// Apply a partial update. A new crest replaces every artifact of the club.
#[instrument(skip(state, payload, upload), fields(id))]
pub async fn update_club(
    state: &AppState,
    id: i32,
    payload: UpdateClub,
    upload: Option<ImageUpload>,
) -> Result<club::Model, AppError> {
    validate_update_club(&payload)?;

    if payload == UpdateClub::default() && upload.is_none() {
        return get_club(&state.db, id).await;
    }

    let txn = state.db.begin().await?;

    let existing = find_club_for_update(&txn, id).await?;
    let mut active: club::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(pavilion_id) = payload.pavilion_id {
        ensure_pavilion_exists(&txn, pavilion_id).await?;
        active.pavilion_id = Set(pavilion_id);
    }
    if let Some(ref upload) = upload {
        active.image = Set(replace_image(state, KIND, id, upload).await?);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

/// Delete a club and its crest. Fails with `Conflict` while games reference it.
#[instrument(skip(state), fields(id))]
pub async fn delete_club(state: &AppState, id: i32) -> Result<(), AppError> {
    let txn = state.db.begin().await?;

    let existing = find_club_for_update(&txn, id).await?;

    let game_count = game::Entity::find()
        .filter(
            Condition::any()
                .add(game::Column::ClubHomeId.eq(id))
                .add(game::Column::ClubVisitorId.eq(id)),
        )
        .count(&txn)
        .await?;
    if game_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete club with scheduled games".into(),
        ));
    }

    remove_image(state, &existing.image).await?;
    club::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    info!(id, "Deleted club");
    Ok(())
}

async fn find_club_for_update(txn: &DatabaseTransaction, id: i32) -> Result<club::Model, AppError> {
    club::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Club not found".into()))
}
