use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Piece, PieceKind, Position, Side, COLS, ROWS};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(EngineError::InvalidMove(s.to_string()));
        }
        let from = s[..2].parse().map_err(|_| EngineError::InvalidMove(s.to_string()))?;
        let to = s[2..].parse().map_err(|_| EngineError::InvalidMove(s.to_string()))?;
        Ok(Move::new(from, to))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Check,
    Checkmate(Side),       // Side is the winner
    Stalemate,
    GeneralCaptured(Side), // Side is the winner
}

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ELEPHANT_STEPS: [(i8, i8); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];
const HORSE_STEPS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (2, -1), (2, 1),
    (-1, -2), (1, -2), (-1, 2), (1, 2),
];

/// Stateless Xiangqi rules: move geometry, check detection and
/// terminal-position classification over a board snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Piece geometry only; ignores whether the mover ends up in check.
    pub fn is_pseudo_legal_move(&self, board: &Board, from: Position, to: Position, side: Side) -> bool {
        if from == to || !from.is_on_board() || !to.is_on_board() {
            return false;
        }
        let piece = match board.get(from) {
            Some(piece) if piece.side == side => piece,
            _ => return false,
        };
        let target = board.get(to);
        if target.map_or(false, |t| t.side == side) {
            return false;
        }

        let dr = to.row as i8 - from.row as i8;
        let dc = to.col as i8 - from.col as i8;
        let (adr, adc) = (dr.abs(), dc.abs());

        match piece.kind {
            PieceKind::General => adr + adc == 1 && to.in_palace(side),
            PieceKind::Advisor => adr == 1 && adc == 1 && to.in_palace(side),
            PieceKind::Elephant => {
                adr == 2
                    && adc == 2
                    && side.owns_row(to.row)
                    && from.offset(dr / 2, dc / 2).map_or(false, |eye| board.is_empty_at(eye))
            }
            PieceKind::Horse => {
                if !((adr == 2 && adc == 1) || (adr == 1 && adc == 2)) {
                    return false;
                }
                horse_leg(from, dr, dc).map_or(false, |leg| board.is_empty_at(leg))
            }
            PieceKind::Chariot => board.count_between(from, to) == Some(0),
            PieceKind::Cannon => match (board.count_between(from, to), target) {
                (Some(0), None) => true,
                (Some(1), Some(_)) => true,
                _ => false,
            },
            PieceKind::Soldier => soldier_can_step(from, dr, dc, side),
        }
    }

    /// Whether `side`'s general is attacked. A missing general is not in check.
    pub fn is_in_check(&self, board: &Board, side: Side) -> bool {
        let general = match board.find_general(side) {
            Some(pos) => pos,
            None => return false,
        };
        let enemy = side.opposite();
        let is_enemy = |piece: Piece, kind: PieceKind| piece.side == enemy && piece.kind == kind;

        // Chariots, cannons and the facing general along the four rays.
        for &(dr, dc) in &ORTHOGONAL {
            let mut screens = 0;
            let mut cursor = general.offset(dr, dc);
            while let Some(pos) = cursor {
                if let Some(piece) = board.get(pos) {
                    if screens == 0 {
                        if is_enemy(piece, PieceKind::Chariot) || is_enemy(piece, PieceKind::General) {
                            return true;
                        }
                        screens = 1;
                    } else {
                        if is_enemy(piece, PieceKind::Cannon) {
                            return true;
                        }
                        break;
                    }
                }
                cursor = pos.offset(dr, dc);
            }
        }

        // Horses, blocked by their own leg square.
        for &(dr, dc) in &HORSE_STEPS {
            let Some(horse) = general.offset(dr, dc) else {
                continue;
            };
            if !board.get(horse).map_or(false, |p| is_enemy(p, PieceKind::Horse)) {
                continue;
            }
            if horse_leg(horse, -dr, -dc).map_or(false, |leg| board.is_empty_at(leg)) {
                return true;
            }
        }

        // Soldiers one step away.
        let forward = enemy.forward();
        for &(dr, dc) in &[(-forward, 0), (0, -1), (0, 1)] {
            let Some(pos) = general.offset(dr, dc) else {
                continue;
            };
            if board.get(pos).map_or(false, |p| is_enemy(p, PieceKind::Soldier))
                && soldier_can_step(pos, -dr, -dc, enemy)
            {
                return true;
            }
        }

        false
    }

    pub fn is_legal_move(&self, board: &Board, from: Position, to: Position, side: Side) -> bool {
        self.is_pseudo_legal_move(board, from, to, side)
            && !self.is_in_check(&board.apply_move(from, to), side)
    }

    pub fn is_move_valid(&self, board: &Board, side: Side, mv: &Move) -> bool {
        self.is_legal_move(board, mv.from, mv.to, side)
    }

    /// Lazily yields every legal move for `side`. Calling it again restarts
    /// the enumeration.
    pub fn legal_moves<'a>(&'a self, board: &'a Board, side: Side) -> impl Iterator<Item = Move> + 'a {
        board
            .pieces()
            .filter(move |(_, piece)| piece.side == side)
            .flat_map(move |(from, piece)| {
                candidate_targets(from, piece)
                    .into_iter()
                    .filter(move |&to| self.is_legal_move(board, from, to, side))
                    .map(move |to| Move::new(from, to))
            })
    }

    pub fn generate_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        self.legal_moves(board, side).collect()
    }

    pub fn has_legal_move(&self, board: &Board, side: Side) -> bool {
        self.legal_moves(board, side).next().is_some()
    }

    pub fn is_checkmate(&self, board: &Board, side: Side) -> bool {
        self.is_in_check(board, side) && !self.has_legal_move(board, side)
    }

    pub fn is_stalemate(&self, board: &Board, side: Side) -> bool {
        !self.is_in_check(board, side) && !self.has_legal_move(board, side)
    }

    /// Classifies the position for the side about to move.
    pub fn get_game_state(&self, board: &Board, side_to_move: Side) -> GameState {
        for side in [side_to_move, side_to_move.opposite()] {
            if board.find_general(side).is_none() {
                return GameState::GeneralCaptured(side.opposite());
            }
        }

        let in_check = self.is_in_check(board, side_to_move);
        if self.has_legal_move(board, side_to_move) {
            return if in_check { GameState::Check } else { GameState::Ongoing };
        }

        if in_check {
            GameState::Checkmate(side_to_move.opposite())
        } else {
            GameState::Stalemate
        }
    }
}

/// The square next to `from` in the direction of the longer leg of an L-move.
fn horse_leg(from: Position, dr: i8, dc: i8) -> Option<Position> {
    if dr.abs() == 2 {
        from.offset(dr / 2, 0)
    } else {
        from.offset(0, dc / 2)
    }
}

fn soldier_can_step(from: Position, dr: i8, dc: i8, side: Side) -> bool {
    let crossed = !side.owns_row(from.row);
    (dr == side.forward() && dc == 0) || (crossed && dr == 0 && dc.abs() == 1)
}

/// Squares a piece could reach by geometry alone; legality is checked later.
fn candidate_targets(from: Position, piece: Piece) -> Vec<Position> {
    fn steps(from: Position, deltas: &[(i8, i8)]) -> Vec<Position> {
        deltas.iter().filter_map(|&(dr, dc)| from.offset(dr, dc)).collect()
    }

    match piece.kind {
        PieceKind::General => steps(from, &ORTHOGONAL),
        PieceKind::Advisor => steps(from, &DIAGONAL),
        PieceKind::Elephant => steps(from, &ELEPHANT_STEPS),
        PieceKind::Horse => steps(from, &HORSE_STEPS),
        PieceKind::Soldier => steps(from, &[(piece.side.forward(), 0), (0, -1), (0, 1)]),
        PieceKind::Chariot | PieceKind::Cannon => (0..ROWS)
            .filter(|&row| row != from.row)
            .map(|row| Position::new(row, from.col))
            .chain(
                (0..COLS)
                    .filter(|&col| col != from.col)
                    .map(|col| Position::new(from.row, col)),
            )
            .collect(),
    }
}
