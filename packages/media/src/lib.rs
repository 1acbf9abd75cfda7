pub mod config;
pub mod imaging;
pub mod storage;

pub use config::{StorageBackend, StorageConfig};
pub use imaging::{ImageError, ImagePipeline, PipelineOptions};
