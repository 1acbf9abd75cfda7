mod club;
mod game;
mod pavilion;
