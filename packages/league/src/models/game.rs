use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AppError;

use super::shared::double_option;

#[derive(Debug, Deserialize)]
pub struct CreateGame {
    pub matchday: i32,
    pub score_home: Option<i32>,
    pub score_visitor: Option<i32>,
    pub date_time: DateTime<Utc>,
    pub club_home_id: i32,
    pub club_visitor_id: i32,
    pub pavilion_id: i32,
    #[serde(default)]
    pub finished: bool,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct UpdateGame {
    pub matchday: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub score_home: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub score_visitor: Option<Option<i32>>,
    pub date_time: Option<DateTime<Utc>>,
    pub club_home_id: Option<i32>,
    pub club_visitor_id: Option<i32>,
    pub pavilion_id: Option<i32>,
    pub finished: Option<bool>,
}

/// Field checks shared by create and (merged) update.
pub fn validate_game_fields(
    matchday: i32,
    score_home: Option<i32>,
    score_visitor: Option<i32>,
    club_home_id: i32,
    club_visitor_id: i32,
) -> Result<(), AppError> {
    if matchday < 1 {
        return Err(AppError::Validation("Matchday must be >= 1".into()));
    }
    if score_home.is_some_and(|s| s < 0) || score_visitor.is_some_and(|s| s < 0) {
        return Err(AppError::Validation("Scores must be >= 0".into()));
    }
    if club_home_id == club_visitor_id {
        return Err(AppError::Validation(
            "Home and visitor clubs must differ".into(),
        ));
    }
    Ok(())
}
