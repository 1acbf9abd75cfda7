use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A fixture between two clubs. Club and pavilion references are checked by
/// the repository rather than declared as relations.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub matchday: i32, // round number, 1-based
    pub score_home: Option<i32>,
    pub score_visitor: Option<i32>,
    pub date_time: DateTimeUtc,

    pub club_home_id: i32,
    pub club_visitor_id: i32,
    pub pavilion_id: i32,

    #[sea_orm(default_value = false)]
    pub finished: bool,
}

impl ActiveModelBehavior for ActiveModel {}
