use std::fmt;

use crate::board::{Board, Side};
use crate::error::EngineError;
use crate::movegen::{GameState, Move, MoveGenerator};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Side },
    // a side with no legal move loses in Xiangqi
    Stalemate { winner: Side },
    GeneralCaptured { winner: Side },
}

impl Outcome {
    pub fn winner(&self) -> Side {
        match *self {
            Outcome::Checkmate { winner }
            | Outcome::Stalemate { winner }
            | Outcome::GeneralCaptured { winner } => winner,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{} wins by checkmate", winner),
            Outcome::Stalemate { winner } => write!(f, "{} wins by stalemate", winner),
            Outcome::GeneralCaptured { winner } => write!(f, "{} wins by capturing the general", winner),
        }
    }
}

/// One game in progress: the current snapshot, whose turn it is, and the
/// snapshots needed to take moves back.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Side,
    history: Vec<(Board, Move)>,
    move_generator: MoveGenerator,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Board::new(), Side::Red)
    }

    pub fn from_position(board: Board, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            history: Vec::new(),
            move_generator: MoveGenerator::new(),
        }
    }

    /// Placement field plus an optional side-to-move field; RED moves when
    /// the side is omitted.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let board = Board::from_fen(fen)?;
        let side = match fen.split_whitespace().nth(1) {
            None => Side::Red,
            Some(token) => {
                let mut chars = token.chars();
                match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => return Err(EngineError::InvalidFen(format!("bad side to move `{token}`"))),
                }
            }
        };
        Ok(Self::from_position(board, side))
    }

    pub fn to_fen(&self) -> String {
        format!("{} {}", self.board.to_fen(), self.side_to_move.fen_char())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|&(_, mv)| mv)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.move_generator.generate_moves(&self.board, self.side_to_move)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.move_generator.is_move_valid(&self.board, self.side_to_move, &mv)
    }

    pub fn status(&self) -> GameState {
        self.move_generator.get_game_state(&self.board, self.side_to_move)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status() {
            GameState::Ongoing | GameState::Check => None,
            GameState::Checkmate(winner) => Some(Outcome::Checkmate { winner }),
            GameState::Stalemate => Some(Outcome::Stalemate {
                winner: self.side_to_move.opposite(),
            }),
            GameState::GeneralCaptured(winner) => Some(Outcome::GeneralCaptured { winner }),
        }
    }

    pub fn play(&mut self, mv: Move) -> Result<(), EngineError> {
        if self.outcome().is_some() {
            return Err(EngineError::GameOver);
        }
        if !self.is_legal(mv) {
            return Err(EngineError::IllegalMove(mv));
        }

        self.history.push((self.board, mv));
        self.board = self.board.make_move(mv);
        info!("{} played {}", self.side_to_move, mv);
        self.side_to_move = self.side_to_move.opposite();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<Move, EngineError> {
        let (board, mv) = self.history.pop().ok_or(EngineError::NothingToUndo)?;
        self.board = board;
        self.side_to_move = self.side_to_move.opposite();
        info!("took back {}", mv);
        Ok(mv)
    }
}
