mod error;
mod pipeline;

pub mod normalize;

pub use error::ImageError;
pub use pipeline::{ImagePipeline, PipelineOptions};
