use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "club")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub image: String, // artifact location

    pub pavilion_id: i32,
    #[sea_orm(belongs_to, from = "pavilion_id", to = "id")]
    pub pavilion: HasOne<super::pavilion::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
