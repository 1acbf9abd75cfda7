pub mod club;
pub mod game;
pub mod pavilion;
pub mod shared;

pub use shared::ImageUpload;
