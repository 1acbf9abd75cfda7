use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pavilion")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub location: String,
    pub location_link: Option<String>,
    pub image: String, // artifact location

    #[sea_orm(has_many)]
    pub clubs: HasMany<super::club::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
