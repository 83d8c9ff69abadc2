pub mod board;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod movegen;
pub mod search;
pub mod ucci;
