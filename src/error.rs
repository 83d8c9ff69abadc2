use thiserror::Error;

use crate::movegen::Move;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("invalid move notation `{0}`")]
    InvalidMove(String),

    #[error("illegal move {0}")]
    IllegalMove(Move),

    #[error("the game is already over")]
    GameOver,

    #[error("no move to undo")]
    NothingToUndo,

    #[error("invalid value `{value}` for {key}")]
    InvalidConfig { key: String, value: String },
}
