use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::movegen::Move;

pub const ROWS: u8 = 10;
pub const COLS: u8 = 9;

pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row delta of a forward soldier step.
    pub fn forward(&self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    /// Whether `row` lies on this side's half of the board.
    pub fn owns_row(&self, row: u8) -> bool {
        match self {
            Side::Red => row >= 5,
            Side::Black => row <= 4,
        }
    }

    pub fn palace_rows(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            Side::Red => 7..=9,
            Side::Black => 0..=2,
        }
    }

    pub fn from_fen_char(c: char) -> Option<Side> {
        match c.to_ascii_lowercase() {
            'w' | 'r' => Some(Side::Red),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    pub fn fen_char(&self) -> char {
        match self {
            Side::Red => 'w',
            Side::Black => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'a' => PieceKind::Advisor,
            'b' | 'e' => PieceKind::Elephant,
            'n' | 'h' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };
        let side = if c.is_ascii_uppercase() { Side::Red } else { Side::Black };
        Some(Self::new(kind, side))
    }

    pub fn fen_char(&self) -> char {
        let c = match self.kind {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        match self.side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

/// A board square. Row 0 is BLACK's back rank, row 9 is RED's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    pub fn offset(&self, dr: i8, dc: i8) -> Option<Position> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 0 || row >= ROWS as i8 || col < 0 || col >= COLS as i8 {
            return None;
        }
        Some(Position::new(row as u8, col as u8))
    }

    pub fn in_palace(&self, side: Side) -> bool {
        (3..=5).contains(&self.col) && side.palace_rows().contains(&self.row)
    }

    /// Every square, row-major from (0, 0).
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'0' + (ROWS - 1 - self.row)) as char;
        write!(f, "{}{}", file, rank)
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidSquare(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'i').contains(&file) || !rank.is_ascii_digit() {
            return Err(invalid());
        }
        Ok(Position::new(ROWS - 1 - (rank - b'0'), file - b'a'))
    }
}

/// An immutable 10x9 snapshot. Applying a move yields a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; COLS as usize]; ROWS as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard opening layout.
    pub fn new() -> Self {
        let back = [
            PieceKind::Chariot,
            PieceKind::Horse,
            PieceKind::Elephant,
            PieceKind::Advisor,
            PieceKind::General,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Horse,
            PieceKind::Chariot,
        ];

        let mut board = Self::empty();
        for (col, &kind) in back.iter().enumerate() {
            let col = col as u8;
            board.place(Position::new(0, col), Piece::new(kind, Side::Black));
            board.place(Position::new(9, col), Piece::new(kind, Side::Red));
        }
        for col in [1, 7] {
            board.place(Position::new(2, col), Piece::new(PieceKind::Cannon, Side::Black));
            board.place(Position::new(7, col), Piece::new(PieceKind::Cannon, Side::Red));
        }
        for col in (0..COLS).step_by(2) {
            board.place(Position::new(3, col), Piece::new(PieceKind::Soldier, Side::Black));
            board.place(Position::new(6, col), Piece::new(PieceKind::Soldier, Side::Red));
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; COLS as usize]; ROWS as usize],
        }
    }

    /// Builder-style placement, used while setting up a position.
    pub fn with_piece(mut self, pos: Position, piece: Piece) -> Self {
        self.place(pos, piece);
        self
    }

    fn place(&mut self, pos: Position, piece: Piece) {
        self.cells[pos.row as usize][pos.col as usize] = Some(piece);
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
            .flatten()
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Returns a new board with the piece on `from` moved to `to`, overwriting
    /// whatever stood there. No legality check.
    pub fn apply_move(&self, from: Position, to: Position) -> Board {
        let mut next = *self;
        let piece = next.cells[from.row as usize][from.col as usize].take();
        next.cells[to.row as usize][to.col as usize] = piece;
        next
    }

    pub fn make_move(&self, mv: Move) -> Board {
        self.apply_move(mv.from, mv.to)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn find_general(&self, side: Side) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::General && piece.side == side)
            .map(|(pos, _)| pos)
    }

    /// Number of occupied squares strictly between two squares on one line.
    /// Returns `None` when the squares do not share a row or column.
    pub fn count_between(&self, from: Position, to: Position) -> Option<usize> {
        if from.row == to.row {
            let (lo, hi) = (from.col.min(to.col), from.col.max(to.col));
            Some(
                (lo + 1..hi)
                    .filter(|&col| !self.is_empty_at(Position::new(from.row, col)))
                    .count(),
            )
        } else if from.col == to.col {
            let (lo, hi) = (from.row.min(to.row), from.row.max(to.row));
            Some(
                (lo + 1..hi)
                    .filter(|&row| !self.is_empty_at(Position::new(row, from.col)))
                    .count(),
            )
        } else {
            None
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let invalid = |why: &str| EngineError::InvalidFen(format!("{why} in `{fen}`"));
        let placement = fen.split_whitespace().next().ok_or_else(|| invalid("empty string"))?;

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != ROWS as usize {
            return Err(invalid("expected 10 ranks"));
        }

        let mut board = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0u8;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as u8;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or_else(|| invalid("unknown piece letter"))?;
                    if col >= COLS {
                        return Err(invalid("rank too long"));
                    }
                    board.place(Position::new(row as u8, col), piece);
                    col += 1;
                }
                if col > COLS {
                    return Err(invalid("rank too long"));
                }
            }
            if col != COLS {
                return Err(invalid("rank too short"));
            }
        }
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for row in 0..ROWS {
            let mut gap = 0;
            for col in 0..COLS {
                match self.get(Position::new(row, col)) {
                    Some(piece) => {
                        if gap > 0 {
                            fen.push_str(&gap.to_string());
                            gap = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                fen.push_str(&gap.to_string());
            }
            if row + 1 < ROWS {
                fen.push('/');
            }
        }
        fen
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..ROWS {
            write!(f, "{} ", ROWS - 1 - row)?;
            for col in 0..COLS {
                let c = self.get(Position::new(row, col)).map_or('.', |p| p.fen_char());
                write!(f, "{}", c)?;
                if col + 1 < COLS {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
            if row == 4 {
                writeln!(f, "  ~~~~~~~~~~~~~~~~~")?;
            }
        }
        write!(f, "  a b c d e f g h i")
    }
}
