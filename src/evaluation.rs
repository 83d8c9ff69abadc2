use crate::board::{Board, PieceKind, Position, Side, COLS, ROWS};

type Table = [[i32; COLS as usize]; ROWS as usize];

pub struct Evaluator {
    // Piece values
    pub general_value: i32,
    pub advisor_value: i32,
    pub elephant_value: i32,
    pub horse_value: i32,
    pub chariot_value: i32,
    pub cannon_value: i32,
    pub soldier_value: i32,

    // Positional bonuses, RED's view: row 0 is the enemy back rank
    pub soldier_position_bonus: Table,
    pub chariot_position_bonus: Table,
    pub horse_position_bonus: Table,
    pub cannon_position_bonus: Table,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            general_value: 10000,
            advisor_value: 200,
            elephant_value: 200,
            horse_value: 450,
            chariot_value: 900,
            cannon_value: 450,
            soldier_value: 100,

            // Soldiers gain value as they cross the river and close in on the palace
            soldier_position_bonus: [
                [0, 3, 6, 9, 12, 9, 6, 3, 0],
                [18, 36, 56, 80, 120, 80, 56, 36, 18],
                [14, 26, 42, 60, 80, 60, 42, 26, 14],
                [10, 20, 30, 34, 40, 34, 30, 20, 10],
                [6, 12, 18, 18, 20, 18, 18, 12, 6],
                [2, 0, 8, 0, 8, 0, 8, 0, 2],
                [0, 0, -2, 0, 4, 0, -2, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
            ],

            // Chariots want open central files and the enemy's second rank
            chariot_position_bonus: [
                [6, 8, 7, 13, 14, 13, 7, 8, 6],
                [6, 12, 9, 16, 33, 16, 9, 12, 6],
                [6, 8, 7, 14, 16, 14, 7, 8, 6],
                [6, 13, 13, 16, 16, 16, 13, 13, 6],
                [8, 11, 11, 14, 15, 14, 11, 11, 8],
                [8, 12, 12, 14, 15, 14, 12, 12, 8],
                [4, 9, 4, 12, 14, 12, 4, 9, 4],
                [-2, 8, 4, 12, 12, 12, 4, 8, -2],
                [5, 8, 6, 12, 0, 12, 6, 8, 5],
                [-6, 6, 4, 12, 0, 12, 4, 6, -6],
            ],

            // Horses are strongest in the centre and near the enemy palace
            horse_position_bonus: [
                [4, 8, 16, 12, 4, 12, 16, 8, 4],
                [4, 10, 28, 16, 8, 16, 28, 10, 4],
                [12, 14, 16, 20, 18, 20, 16, 14, 12],
                [8, 24, 18, 24, 20, 24, 18, 24, 8],
                [6, 16, 14, 18, 16, 18, 14, 16, 6],
                [4, 12, 16, 14, 12, 14, 16, 12, 4],
                [2, 6, 8, 6, 10, 6, 8, 6, 2],
                [4, 2, 8, 8, 4, 8, 8, 2, 4],
                [0, 2, 4, 4, -2, 4, 4, 2, 0],
                [0, -4, 0, 0, 0, 0, 0, -4, 0],
            ],

            cannon_position_bonus: [
                [6, 4, 0, -10, -12, -10, 0, 4, 6],
                [2, 2, 0, -4, -14, -4, 0, 2, 2],
                [2, 2, 0, -10, -8, -10, 0, 2, 2],
                [0, 0, -2, 4, 10, 4, -2, 0, 0],
                [0, 0, 0, 2, 8, 2, 0, 0, 0],
                [-2, 0, 4, 2, 6, 2, 4, 0, -2],
                [0, 0, 0, 2, 4, 2, 0, 0, 0],
                [4, 0, 8, 6, 10, 6, 8, 0, 4],
                [0, 2, 4, 6, 6, 6, 4, 2, 0],
                [0, 0, 2, 6, 6, 6, 2, 0, 0],
            ],
        }
    }

    /// Material plus position, positive when `perspective` is ahead.
    pub fn evaluate(&self, board: &Board, perspective: Side) -> i32 {
        board
            .pieces()
            .map(|(pos, piece)| {
                let value = self.get_piece_value(piece.kind, piece.side, pos);
                if piece.side == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    fn get_piece_value(&self, kind: PieceKind, side: Side, pos: Position) -> i32 {
        let base_value = match kind {
            PieceKind::General => self.general_value,
            PieceKind::Advisor => self.advisor_value,
            PieceKind::Elephant => self.elephant_value,
            PieceKind::Horse => self.horse_value,
            PieceKind::Chariot => self.chariot_value,
            PieceKind::Cannon => self.cannon_value,
            PieceKind::Soldier => self.soldier_value,
        };

        // BLACK reads the same tables upside down
        let row = match side {
            Side::Red => pos.row as usize,
            Side::Black => (ROWS - 1 - pos.row) as usize,
        };
        let col = pos.col as usize;

        let position_bonus = match kind {
            PieceKind::Soldier => self.soldier_position_bonus[row][col],
            PieceKind::Chariot => self.chariot_position_bonus[row][col],
            PieceKind::Horse => self.horse_position_bonus[row][col],
            PieceKind::Cannon => self.cannon_position_bonus[row][col],
            PieceKind::General | PieceKind::Advisor | PieceKind::Elephant => 0,
        };

        base_value + position_bonus
    }
}
