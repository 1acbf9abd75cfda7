pub mod club;
pub mod game;
pub mod pavilion;
