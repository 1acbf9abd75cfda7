use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use media::ImagePipeline;
use tracing::info;
use tracing_subscriber::EnvFilter;

use league::config::AppConfig;
use league::database::init_db;
use league::error::AppError;

#[derive(Parser)]
#[command(name = "league", version, about = "League data and image artifact maintenance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect to the database and create the league tables
    InitDb,
    /// Normalize an image and store it under a folder
    Ingest {
        file: PathBuf,
        /// Target folder, e.g. clubs/42
        #[arg(long)]
        folder: String,
    },
    /// Like ingest, but first removes the folder's existing artifacts
    Replace {
        file: PathBuf,
        #[arg(long)]
        folder: String,
    },
    /// Delete the artifact at a previously returned location
    Remove { location: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Command::InitDb => {
            init_db(&config.database)
                .await
                .context("Failed to initialize database")?;
            info!("Database ready");
        }
        Command::Ingest { file, folder } => {
            let images = open_pipeline(&config).await?;
            let data = read_upload(&file).await?;
            let location = images.ingest(&data, &folder).await.map_err(report)?;
            println!("{location}");
        }
        Command::Replace { file, folder } => {
            let images = open_pipeline(&config).await?;
            let data = read_upload(&file).await?;
            let location = images.replace(&data, &folder).await.map_err(report)?;
            println!("{location}");
        }
        Command::Remove { location } => {
            let images = open_pipeline(&config).await?;
            images.remove(&location).await.map_err(report)?;
            info!(%location, "Removed");
        }
    }

    Ok(())
}

async fn open_pipeline(config: &AppConfig) -> anyhow::Result<ImagePipeline> {
    ImagePipeline::from_config(&config.storage)
        .await
        .context("Failed to open image storage")
}

async fn read_upload(file: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))
}

/// Render a pipeline failure as the structured body a client would receive.
fn report(err: media::ImageError) -> anyhow::Error {
    let (status, body) = AppError::from(err).status_and_body();
    let body = serde_json::to_string(&body).unwrap_or_else(|_| body.message.clone());
    anyhow::anyhow!("{status} {body}")
}
