use media::ImagePipeline;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::database::init_db;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub images: ImagePipeline,
}

impl AppState {
    /// Connect the database and open the configured image store.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let db = init_db(&config.database).await?;
        let images = ImagePipeline::from_config(&config.storage).await?;
        Ok(Self { db, images })
    }
}
