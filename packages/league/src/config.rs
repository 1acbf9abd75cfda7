use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use media::StorageConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Environment::with_prefix("LEAGUE").separator("__"))
    }

    /// Load using `env` as the final override layer.
    pub fn load_with(env: Environment) -> Result<Self, ConfigError> {
        let s = Self::defaults()?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., LEAGUE__STORAGE__BACKEND=bucket)
            .add_source(env)
            .build()?;

        s.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database.url", "postgres://localhost/league")?
            .set_default("database.max_connections", 100)?
            .set_default("database.min_connections", 5)?
            .set_default("storage.backend", "filesystem")?
            .set_default("storage.filesystem.root", "static")
    }
}
