//! Position evaluation.
//!
//! The evaluator runs the chain search once per color and combines the
//! results with pair-connectivity and goal-occupancy features into a
//! signed score from one player's perspective. A completed network
//! collapses the score to the [`NETWORK_WIN`] sentinel. All per-call
//! scratch state lives in a [`Features`] value, so the evaluator is
//! reentrant.

use crate::board::{Board, Color};
use crate::constants::{ANCHORED_CHAIN_BONUS, CHAIN_LEN_CAP, NETWORK_WIN, SIZE};
use crate::learning::WeightTable;
use crate::network::{connected_tiles, find_chain, Chain};
use crate::position::{is_opposite_goal, Goal, Pos};

/// Outcome of evaluating a board for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Signed score from the evaluated color's perspective.
    pub score: i32,
    /// The winner, when either side has completed a network.
    pub winner: Option<Color>,
}

/// Per-call board features: tile lists and pair counts for both colors.
struct Features {
    black_tiles: Vec<Pos>,
    white_tiles: Vec<Pos>,
    black_pairs: i32,
    white_pairs: i32,
}

impl Features {
    fn collect(board: &Board) -> Self {
        let black_tiles = board.tiles_of(Color::Black);
        let white_tiles = board.tiles_of(Color::White);
        let black_pairs = count_pairs(board, &black_tiles);
        let white_pairs = count_pairs(board, &white_tiles);
        Features {
            black_tiles,
            white_tiles,
            black_pairs,
            white_pairs,
        }
    }

    fn tiles(&self, color: Color) -> &[Pos] {
        match color {
            Color::Black => &self.black_tiles,
            Color::White => &self.white_tiles,
        }
    }

    fn pairs(&self, color: Color) -> i32 {
        match color {
            Color::Black => self.black_pairs,
            Color::White => self.white_pairs,
        }
    }
}

/// Evaluate `board` from `color`'s perspective.
pub fn evaluate(board: &Board, color: Color) -> Evaluation {
    evaluate_inner(board, color, None)
}

/// Evaluate with the heuristic score scaled by the learned multiplier for
/// this board's signature. Win sentinels are never scaled; the multiplier
/// reweights judgment calls, not decided positions.
pub fn evaluate_weighted(board: &Board, color: Color, weights: &WeightTable) -> Evaluation {
    evaluate_inner(board, color, Some(weights))
}

fn evaluate_inner(board: &Board, color: Color, weights: Option<&WeightTable>) -> Evaluation {
    let other = color.opponent();
    let features = Features::collect(board);
    let own_chain = find_chain(board, color);
    let other_chain = find_chain(board, other);

    let winner = decide_winner(board, color, &own_chain, &other_chain);
    if winner == Some(color) {
        return Evaluation {
            score: NETWORK_WIN,
            winner,
        };
    }
    if winner == Some(other) {
        return Evaluation {
            score: -NETWORK_WIN,
            winner,
        };
    }

    let mut score = chain_quality(&own_chain) - chain_quality(&other_chain);
    score += placement_quality(&features, color) - placement_quality(&features, other);
    if let Some(table) = weights {
        let multiplier = table.get(board.signature());
        score = (score as f64 * multiplier).round() as i32;
    }
    Evaluation {
        score,
        winner: None,
    }
}

/// Winner of a position, if any side has completed a network. When both
/// sides hold one, credit goes to the color not currently on turn: the
/// board's turn advanced when the last move was applied, so the side off
/// turn is the one whose move completed its network, and the side on turn
/// has not yet had a chance to respond.
fn decide_winner(board: &Board, color: Color, own: &Chain, other: &Chain) -> Option<Color> {
    let opponent = color.opponent();
    match (own.is_network, other.is_network) {
        (true, true) => Some(board.turn().opponent()),
        (true, false) => Some(color),
        (false, true) => Some(opponent),
        (false, false) => None,
    }
}

/// Quality of a chain: length squared up to the cap (a seventh tile earns
/// nothing), a bonus for a long chain already anchored in opposite goals,
/// minus the accumulated ring gaps between consecutive tiles.
fn chain_quality(chain: &Chain) -> i32 {
    if chain.is_empty() {
        return 0;
    }
    let len = chain.len().min(CHAIN_LEN_CAP) as i32;
    let mut quality = len * len;
    if chain.len() > 4 && is_opposite_goal(&chain.tiles[0], &chain.tiles[chain.len() - 1]) {
        quality += ANCHORED_CHAIN_BONUS;
    }
    quality -= chain.tiles.iter().map(|p| p.space as i32).sum::<i32>();
    quality
}

/// Tile-placement quality: pair connectivity plus goal occupancy.
fn placement_quality(features: &Features, color: Color) -> i32 {
    features.pairs(color) + goal_score(features.tiles(color))
}

/// Total connected-neighbor relationships among `tiles`, halved since each
/// pair is seen from both ends.
fn count_pairs(board: &Board, tiles: &[Pos]) -> i32 {
    let total: usize = tiles
        .iter()
        .map(|p| connected_tiles(board, p).len())
        .sum();
    (total / 2) as i32
}

/// Goal occupancy score: a single goal tile is worth 1, worth 5 more when
/// established early (fewer than 3 tiles placed), and 2 when it sits in
/// the central band of its goal. Stacking several tiles in the same goal
/// costs a point for each beyond the first.
fn goal_score(tiles: &[Pos]) -> i32 {
    let mut score = 0;
    let mut goal_a = 0;
    let mut goal_b = 0;
    for p in tiles {
        match p.goal {
            Some(Goal::A) => goal_a += 1,
            Some(Goal::B) => goal_b += 1,
            None => {}
        }
        if is_center_goal(p) {
            score = 2;
        }
    }
    if goal_a > 0 || goal_b > 0 {
        score += 1;
        if tiles.len() < 3 {
            score += 5;
        }
        if goal_a > 1 {
            score -= goal_a - 1;
        }
        if goal_b > 1 {
            score -= goal_b - 1;
        }
    }
    score
}

/// True if `p` is a goal cell in the central columns/rows (3 or 4) of its
/// band, the most flexible anchor points for a network.
fn is_center_goal(p: &Pos) -> bool {
    if (p.x == 0 || p.x == SIZE - 1) && (p.y == 3 || p.y == 4) {
        return true;
    }
    if (p.y == 0 || p.y == SIZE - 1) && (p.x == 3 || p.x == 4) {
        return true;
    }
    false
}
