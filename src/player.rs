//! The machine player: move selection, move intake, and game records.
//!
//! A [`MachinePlayer`] owns its view of the game board, keeps it current
//! from both sides' moves, and picks its own moves with the alpha-beta
//! search. Every applied move appends the board signature to the game
//! record, which feeds the weight-learning step once a winner is known.

use log::{debug, info};

use crate::board::{Board, Color, Move};
use crate::constants::DEFAULT_SEARCH_DEPTH;
use crate::evaluator;
use crate::learning::{GameRecord, WeightTable};
use crate::minimax::Searcher;

/// An automatic player for one side.
pub struct MachinePlayer {
    color: Color,
    search_depth: u32,
    board: Board,
    weights: Option<WeightTable>,
    record: GameRecord,
}

impl MachinePlayer {
    /// Player with the default search depth. White moves first.
    pub fn new(color: Color) -> Self {
        Self::with_depth(color, DEFAULT_SEARCH_DEPTH)
    }

    pub fn with_depth(color: Color, search_depth: u32) -> Self {
        MachinePlayer {
            color,
            search_depth,
            board: Board::new(),
            weights: None,
            record: GameRecord::new(Color::White),
        }
    }

    /// Attach a learned weight table; subsequent searches scale their
    /// evaluations by it.
    pub fn attach_weights(&mut self, weights: WeightTable) {
        self.weights = Some(weights);
    }

    pub fn weights(&self) -> Option<&WeightTable> {
        self.weights.as_ref()
    }

    pub fn take_weights(&mut self) -> Option<WeightTable> {
        self.weights.take()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Read-only view of the internal board, sufficient for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The winner of the current position, if a network is complete.
    pub fn winner(&self) -> Option<Color> {
        evaluator::evaluate(&self.board, self.color).winner
    }

    /// Compute the best move for this player, apply it to the internal
    /// board, and return it for transmission to the opponent. `None` when
    /// no legal move exists.
    pub fn choose_move(&mut self) -> Option<Move> {
        let best = match &self.weights {
            Some(table) => {
                Searcher::with_weights(&mut self.board, self.color, self.search_depth, table)
                    .best_move()
            }
            None => Searcher::new(&mut self.board, self.color, self.search_depth).best_move(),
        };
        let mv = best.mv?;
        let applied = self.board.execute_move(&mv);
        debug_assert!(applied, "search returned an illegal move {mv}");
        self.record.push(self.board.signature());
        debug!("{:?} plays {mv} (score {})", self.color, best.score);
        Some(mv)
    }

    /// Record a move reported by the opponent. The move is validated with
    /// the full game rules; `false` means it was rejected and no state
    /// changed.
    pub fn opponent_move(&mut self, mv: &Move) -> bool {
        let accepted = self.board.execute_move(mv);
        if accepted {
            self.record.push(self.board.signature());
        }
        accepted
    }

    /// Apply a move for the side on turn with the add/step phase gating
    /// bypassed. Unlike `opponent_move` this accepts step moves before a
    /// hand is exhausted, which makes it possible to set up midgame
    /// scenarios; placement rules still hold. The validation asymmetry
    /// with `opponent_move` is deliberate.
    pub fn force_move(&mut self, mv: &Move) -> bool {
        let accepted = self.board.force_move(mv);
        if accepted {
            self.record.push(self.board.signature());
        }
        accepted
    }

    /// Fold the finished game into the attached weight table. No-op
    /// without one.
    pub fn learn(&mut self, winner: Color) {
        if let Some(table) = self.weights.as_mut() {
            table.apply_outcome(&self.record, winner);
            info!(
                "learned from {} positions, winner {:?}, table size {}",
                self.record.len(),
                winner,
                table.len()
            );
        }
    }

    /// Reset the board and game record for a fresh game, keeping the
    /// weight table.
    pub fn start_new_game(&mut self) {
        self.board = Board::new();
        self.record.clear();
    }
}
