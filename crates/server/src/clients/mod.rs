pub mod chess_api;
pub mod vision;
