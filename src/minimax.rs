//! Depth-limited minimax search with alpha-beta pruning.
//!
//! The search owns a mutable borrow of the board for its whole run and
//! walks the game tree by applying and undoing moves in place, never
//! copying the grid. Every frame applies exactly one move and undoes it
//! before trying the next, so the board a caller sees after a search is
//! byte-identical to the one it passed in.

use log::debug;

use crate::board::{Board, Color, Move};
use crate::constants::NETWORK_WIN;
use crate::evaluator::{self, Evaluation};
use crate::learning::WeightTable;

/// A move paired with the score the search proved for it. `mv` is `None`
/// at leaf frames and when the position has no legal moves.
#[derive(Debug, Clone, Copy)]
pub struct MoveScore {
    pub mv: Option<Move>,
    pub score: i32,
}

/// One game-tree search over a borrowed board.
pub struct Searcher<'a> {
    board: &'a mut Board,
    color: Color,
    depth_limit: u32,
    weights: Option<&'a WeightTable>,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(board: &'a mut Board, color: Color, depth_limit: u32) -> Self {
        Searcher {
            board,
            color,
            depth_limit,
            weights: None,
            nodes: 0,
        }
    }

    /// Search with the evaluator's learned-weight scaling enabled.
    pub fn with_weights(
        board: &'a mut Board,
        color: Color,
        depth_limit: u32,
        weights: &'a WeightTable,
    ) -> Self {
        Searcher {
            board,
            color,
            depth_limit,
            weights: Some(weights),
            nodes: 0,
        }
    }

    /// Find the best move for `color` on the current board.
    pub fn best_move(&mut self) -> MoveScore {
        self.nodes = 0;
        let best = self.alpha_beta(0, i32::MIN, i32::MAX, true);
        debug!(
            "search depth {} considered {} nodes, score {}",
            self.depth_limit, self.nodes, best.score
        );
        best
    }

    fn evaluate(&self) -> Evaluation {
        match self.weights {
            Some(table) => evaluator::evaluate_weighted(self.board, self.color, table),
            None => evaluator::evaluate(self.board, self.color),
        }
    }

    /// Alpha-beta over recursion depth. The maximizing role belongs to the
    /// searched color and flips on each descent; the board's own turn
    /// tracking decides which side's moves are generated at each ply.
    fn alpha_beta(&mut self, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> MoveScore {
        let eval = self.evaluate();
        if depth > self.depth_limit || eval.winner.is_some() {
            let mut score = eval.score;
            // Prefer the shortest forced win and the longest forced loss.
            if score >= NETWORK_WIN {
                score -= depth as i32;
            } else if score <= -NETWORK_WIN {
                score += depth as i32;
            }
            return MoveScore { mv: None, score };
        }

        let moves = self.board.valid_moves();
        if moves.is_empty() {
            return MoveScore {
                mv: None,
                score: eval.score,
            };
        }

        // Seed the running best with the first candidate so a move is
        // returned even when every reply ties the incoming bound.
        let mut best = MoveScore {
            mv: Some(moves[0]),
            score: if maximizing { alpha } else { beta },
        };
        for mv in &moves {
            self.nodes += 1;
            let applied = self.board.execute_move(mv);
            debug_assert!(applied, "generated move {mv} must be legal");
            let reply = self.alpha_beta(depth + 1, alpha, beta, !maximizing);
            self.board.undo_move(mv);
            if maximizing && reply.score > best.score {
                best = MoveScore {
                    mv: Some(*mv),
                    score: reply.score,
                };
                alpha = reply.score;
            } else if !maximizing && reply.score < best.score {
                best = MoveScore {
                    mv: Some(*mv),
                    score: reply.score,
                };
                beta = reply.score;
            }
            if alpha >= beta {
                return best;
            }
        }
        best
    }
}
