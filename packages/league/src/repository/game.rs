use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::{info, instrument};

use super::{ensure_club_exists, ensure_pavilion_exists};
use crate::entity::game;
use crate::error::AppError;
use crate::models::game::*;
use crate::state::AppState;

#[instrument(skip(state, payload), fields(matchday = payload.matchday))]
pub async fn create_game(state: &AppState, payload: CreateGame) -> Result<game::Model, AppError> {
    validate_game_fields(
        payload.matchday,
        payload.score_home,
        payload.score_visitor,
        payload.club_home_id,
        payload.club_visitor_id,
    )?;

    let txn = state.db.begin().await?;
    ensure_references(
        &txn,
        payload.club_home_id,
        payload.club_visitor_id,
        payload.pavilion_id,
    )
    .await?;

    let new_game = game::ActiveModel {
        matchday: Set(payload.matchday),
        score_home: Set(payload.score_home),
        score_visitor: Set(payload.score_visitor),
        date_time: Set(payload.date_time),
        club_home_id: Set(payload.club_home_id),
        club_visitor_id: Set(payload.club_visitor_id),
        pavilion_id: Set(payload.pavilion_id),
        finished: Set(payload.finished),
        ..Default::default()
    };
    let model = new_game.insert(&txn).await?;

    txn.commit().await?;
    info!(id = model.id, "Created game");
    Ok(model)
}

#[instrument(skip(db))]
pub async fn get_game<C: ConnectionTrait>(db: &C, id: i32) -> Result<game::Model, AppError> {
    game::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Game not found".into()))
}

/// All games in kick-off order.
pub async fn list_games<C: ConnectionTrait>(db: &C) -> Result<Vec<game::Model>, AppError> {
    let games = game::Entity::find()
        .order_by_asc(game::Column::DateTime)
        .order_by_asc(game::Column::Id)
        .all(db)
        .await?;
    Ok(games)
}

/// Apply a partial update. The merged game is validated as a whole.
#[instrument(skip(state, payload), fields(id))]
pub async fn update_game(
    state: &AppState,
    id: i32,
    payload: UpdateGame,
) -> Result<game::Model, AppError> {
    if payload == UpdateGame::default() {
        return get_game(&state.db, id).await;
    }

    let txn = state.db.begin().await?;

    let existing = find_game_for_update(&txn, id).await?;

    let matchday = payload.matchday.unwrap_or(existing.matchday);
    let score_home = payload.score_home.unwrap_or(existing.score_home);
    let score_visitor = payload.score_visitor.unwrap_or(existing.score_visitor);
    let club_home_id = payload.club_home_id.unwrap_or(existing.club_home_id);
    let club_visitor_id = payload.club_visitor_id.unwrap_or(existing.club_visitor_id);
    let pavilion_id = payload.pavilion_id.unwrap_or(existing.pavilion_id);

    validate_game_fields(matchday, score_home, score_visitor, club_home_id, club_visitor_id)?;
    ensure_references(&txn, club_home_id, club_visitor_id, pavilion_id).await?;

    let mut active: game::ActiveModel = existing.into();
    active.matchday = Set(matchday);
    active.score_home = Set(score_home);
    active.score_visitor = Set(score_visitor);
    active.club_home_id = Set(club_home_id);
    active.club_visitor_id = Set(club_visitor_id);
    active.pavilion_id = Set(pavilion_id);
    if let Some(date_time) = payload.date_time {
        active.date_time = Set(date_time);
    }
    if let Some(finished) = payload.finished {
        active.finished = Set(finished);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

#[instrument(skip(state), fields(id))]
pub async fn delete_game(state: &AppState, id: i32) -> Result<(), AppError> {
    let result = game::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Game not found".into()));
    }
    info!(id, "Deleted game");
    Ok(())
}

async fn find_game_for_update(txn: &DatabaseTransaction, id: i32) -> Result<game::Model, AppError> {
    game::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Game not found".into()))
}

async fn ensure_references<C: ConnectionTrait>(
    db: &C,
    club_home_id: i32,
    club_visitor_id: i32,
    pavilion_id: i32,
) -> Result<(), AppError> {
    ensure_club_exists(db, club_home_id).await?;
    ensure_club_exists(db, club_visitor_id).await?;
    ensure_pavilion_exists(db, pavilion_id).await
}
