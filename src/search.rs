use crate::board::{Board, Side};
use crate::config::EngineConfig;
use crate::evaluation::Evaluator;
use crate::movegen::{Move, MoveGenerator};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Score of a node whose side to move has no legal move. Not adjusted for
/// mate distance.
pub const TERMINAL_SCORE: i32 = 9000;

const INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u32,
    pub nodes_searched: u64,
}

pub struct Search {
    evaluator: Evaluator,
    move_generator: MoveGenerator,
    rng: StdRng,
    nodes_searched: u64,
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

impl Search {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible tie-breaking, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            evaluator: Evaluator::new(),
            move_generator: MoveGenerator::new(),
            rng,
            nodes_searched: 0,
        }
    }

    pub fn find_best_move(&mut self, board: &Board, side: Side, depth: u32) -> Option<Move> {
        self.analyse(board, side, depth).best_move
    }

    /// Searches `depth` plies for `side`. Candidates are shuffled first and
    /// only a strictly better score replaces the current best, so equal
    /// moves are picked at random.
    pub fn analyse(&mut self, board: &Board, side: Side, depth: u32) -> SearchResult {
        self.nodes_searched = 0;

        let mut moves = self.move_generator.generate_moves(board, side);
        moves.shuffle(&mut self.rng);
        debug!("searching {} moves for {} at depth {}", moves.len(), side, depth);

        let mut best_move = None;
        let mut best_score = i32::MIN;

        for mv in moves {
            let next = board.make_move(mv);
            let score = self.minimax(&next, depth.saturating_sub(1), -INFINITY, INFINITY, false, side);
            trace!("candidate {} scored {}", mv, score);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        if best_move.is_none() {
            best_score = -TERMINAL_SCORE;
        }

        debug!(
            "best move {} score {} after {} nodes",
            best_move.map_or_else(|| "(none)".to_string(), |mv| mv.to_string()),
            best_score,
            self.nodes_searched
        );

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes_searched: self.nodes_searched,
        }
    }

    /// Alpha-beta minimax. Leaves are always scored for `root_side`.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        root_side: Side,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return self.evaluator.evaluate(board, root_side);
        }

        let current_side = if maximizing { root_side } else { root_side.opposite() };
        let moves = self.move_generator.generate_moves(board, current_side);
        if moves.is_empty() {
            return if maximizing { -TERMINAL_SCORE } else { TERMINAL_SCORE };
        }

        if maximizing {
            let mut best_score = -INFINITY;
            for mv in moves {
                let score = self.minimax(&board.make_move(mv), depth - 1, alpha, beta, false, root_side);
                best_score = best_score.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best_score
        } else {
            let mut best_score = INFINITY;
            for mv in moves {
                let score = self.minimax(&board.make_move(mv), depth - 1, alpha, beta, true, root_side);
                best_score = best_score.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best_score
        }
    }

    pub fn get_nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}
