//! Board state, placement rules, move generation, and apply/undo.
//!
//! The board is an 8x8 grid of optional tiles indexed `[x][y]`, with
//! per-color placed-tile counts and turn tracking. Every mutating entry
//! point that accepts moves validates first and returns `false` leaving the
//! state untouched on rejection; legality depends on state the caller
//! cannot always pre-verify (goal ownership, the cluster rule, and the
//! add-versus-step phase), so the return value must be checked.
//!
//! `execute_move` and `undo_move` are exact inverses. The game-tree search
//! leans on this: each recursive frame applies one move and undoes it
//! before returning, leaving the grid, counts, and turn byte-identical.

use std::collections::HashSet;
use std::fmt;

use crate::constants::{SIZE, TILES_PER_PLAYER};
use crate::evaluator;
use crate::neighbors::Neighbors;
use crate::position::Pos;

/// Tile color. White moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// A move: place a new tile, or relocate one already on the board.
/// Step moves only become available once the mover has placed all of their
/// tiles; add moves are only available before that.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Add { x: i32, y: i32 },
    Step { x: i32, y: i32, from_x: i32, from_y: i32 },
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Add { x, y } => write!(f, "add ({x},{y})"),
            Move::Step { x, y, from_x, from_y } => {
                write!(f, "step ({from_x},{from_y}) -> ({x},{y})")
            }
        }
    }
}

/// The game board.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Color>; SIZE as usize]; SIZE as usize],
    black_count: u32,
    white_count: u32,
    turn: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            grid: [[None; SIZE as usize]; SIZE as usize],
            black_count: 0,
            white_count: 0,
            turn: Color::White,
        }
    }

    // =========================================================================
    // Cell access
    // =========================================================================

    pub fn tile_at(&self, x: i32, y: i32) -> Option<Color> {
        self.grid[x as usize][y as usize]
    }

    pub fn tile_at_pos(&self, p: &Pos) -> Option<Color> {
        self.tile_at(p.x, p.y)
    }

    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_none()
    }

    /// Raw cell write. Does not touch the placed-tile counts; those are
    /// maintained by `execute_move`/`undo_move`.
    pub fn set_tile(&mut self, x: i32, y: i32, color: Color) {
        self.grid[x as usize][y as usize] = Some(color);
    }

    /// Raw cell clear, returning the previous occupant.
    pub fn remove_tile(&mut self, x: i32, y: i32) -> Option<Color> {
        self.grid[x as usize][y as usize].take()
    }

    // =========================================================================
    // Turn and counts
    // =========================================================================

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn end_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    pub fn tile_count(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_count,
            Color::White => self.white_count,
        }
    }

    /// Placed-tile count for the player on turn.
    pub fn current_player_tile_count(&self) -> u32 {
        self.tile_count(self.turn)
    }

    fn increment_count(&mut self, color: Color) {
        match color {
            Color::Black => self.black_count += 1,
            Color::White => self.white_count += 1,
        }
    }

    fn decrement_count(&mut self, color: Color) {
        match color {
            Color::Black => self.black_count -= 1,
            Color::White => self.white_count -= 1,
        }
    }

    // =========================================================================
    // Placement rules
    // =========================================================================

    /// Rule 1: no tile may be placed in any of the four corners.
    fn is_corner(x: i32, y: i32) -> bool {
        (x == 0 || x == SIZE - 1) && (y == 0 || y == SIZE - 1)
    }

    /// Rule 2: no tile may be placed in the opponent's goal. Columns 0 and
    /// 7 belong to Black, rows 0 and 7 to White.
    fn is_opponent_goal(x: i32, y: i32, color: Color) -> bool {
        match color {
            Color::White => x == 0 || x == SIZE - 1,
            Color::Black => y == 0 || y == SIZE - 1,
        }
    }

    /// Rule 4: a player may not have three or more tiles in a connected
    /// group (orthogonally or diagonally). Checked with a two-hop probe of
    /// the candidate's neighborhood: a same-color immediate neighbor, plus
    /// either another immediate neighbor or any same-color neighbor of the
    /// first, already makes a group of three once the candidate lands.
    fn forms_cluster(&self, x: i32, y: i32, color: Color) -> bool {
        let mut visited: HashSet<Pos> = HashSet::new();
        let mut count = 0;
        for p1 in Neighbors::new(x, y).iter() {
            if visited.contains(p1) {
                continue;
            }
            visited.insert(*p1);
            if self.tile_at(p1.x, p1.y) == Some(color) {
                if count == 1 {
                    return true;
                }
                count += 1;
                for p2 in Neighbors::new(p1.x, p1.y).iter() {
                    if visited.contains(p2) {
                        continue;
                    }
                    if self.tile_at(p2.x, p2.y) == Some(color) {
                        if count == 1 {
                            return true;
                        }
                        count += 1;
                    }
                }
            }
        }
        false
    }

    /// True if `color` may place a tile at (x, y): not a corner, not the
    /// opponent's goal, currently empty, and no cluster of three results.
    pub fn is_valid_placement(&self, x: i32, y: i32, color: Color) -> bool {
        if Self::is_corner(x, y) {
            return false;
        }
        if Self::is_opponent_goal(x, y, color) {
            return false;
        }
        if !self.is_empty(x, y) {
            return false;
        }
        if self.forms_cluster(x, y, color) {
            return false;
        }
        true
    }

    /// True if the mover may apply the add move: still in the placement
    /// phase and the target is a legal placement.
    pub fn is_valid_add_move(&self, x: i32, y: i32) -> bool {
        if self.current_player_tile_count() >= TILES_PER_PLAYER {
            return false;
        }
        self.is_valid_placement(x, y, self.turn)
    }

    /// True if the mover may apply the step move: all tiles placed, the
    /// source holds the mover's tile, and the target is a legal placement
    /// once the source is vacated.
    pub fn is_valid_step_move(&mut self, x: i32, y: i32, from_x: i32, from_y: i32) -> bool {
        if self.current_player_tile_count() < TILES_PER_PLAYER {
            return false;
        }
        if x == from_x && y == from_y {
            return false;
        }
        if self.tile_at(from_x, from_y) != Some(self.turn) {
            return false;
        }
        let mover = self.turn;
        self.remove_tile(from_x, from_y);
        let valid = self.is_valid_placement(x, y, mover);
        self.set_tile(from_x, from_y, mover);
        valid
    }

    // =========================================================================
    // Move application
    // =========================================================================

    /// Validate and apply a move for the player on turn, then pass the
    /// turn. Returns `false` leaving the board untouched if the move is
    /// illegal.
    pub fn execute_move(&mut self, mv: &Move) -> bool {
        let player = self.turn;
        match *mv {
            Move::Add { x, y } => {
                if !self.is_valid_add_move(x, y) {
                    return false;
                }
                self.set_tile(x, y, player);
                self.increment_count(player);
                self.end_turn();
                true
            }
            Move::Step { x, y, from_x, from_y } => {
                if !self.is_valid_step_move(x, y, from_x, from_y) {
                    return false;
                }
                self.remove_tile(from_x, from_y);
                self.set_tile(x, y, player);
                self.end_turn();
                true
            }
        }
    }

    /// Apply a move with the add/step phase gating bypassed: an add move
    /// skips the tile-count check and a step move only requires source
    /// ownership plus a legal target. Placement rules (corner, goal,
    /// occupancy, cluster) still hold. Used to set up test scenarios; game
    /// play goes through `execute_move`.
    pub fn force_move(&mut self, mv: &Move) -> bool {
        let player = self.turn;
        match *mv {
            Move::Add { x, y } => {
                if !self.is_valid_placement(x, y, player) {
                    return false;
                }
                self.set_tile(x, y, player);
                self.increment_count(player);
                self.end_turn();
                true
            }
            Move::Step { x, y, from_x, from_y } => {
                if (x == from_x && y == from_y) || self.tile_at(from_x, from_y) != Some(player) {
                    return false;
                }
                self.remove_tile(from_x, from_y);
                if !self.is_valid_placement(x, y, player) {
                    self.set_tile(from_x, from_y, player);
                    return false;
                }
                self.set_tile(x, y, player);
                self.end_turn();
                true
            }
        }
    }

    /// Revert the most recently executed move. No validity checks: the
    /// caller guarantees `mv` was the last move applied, which the search
    /// upholds by pairing every `execute_move` with exactly one undo.
    pub fn undo_move(&mut self, mv: &Move) {
        let turn = self.turn;
        match *mv {
            Move::Add { x, y } => {
                self.remove_tile(x, y);
                // The mover is the player no longer on turn.
                self.decrement_count(turn.opponent());
                self.end_turn();
            }
            Move::Step { x, y, from_x, from_y } => {
                self.remove_tile(x, y);
                self.set_tile(from_x, from_y, turn.opponent());
                self.end_turn();
            }
        }
    }

    // =========================================================================
    // Move generation
    // =========================================================================

    /// Every legal move for the player on turn, in a fixed scan order so
    /// search tie-breaks are reproducible. Add moves while the mover still
    /// has tiles in hand; otherwise step moves, generated by vacating each
    /// own tile in turn and restoring it before trying the next source.
    pub fn valid_moves(&mut self) -> Vec<Move> {
        let turn = self.turn;
        let mut moves = Vec::with_capacity(64);
        if self.current_player_tile_count() < TILES_PER_PLAYER {
            for x in 0..SIZE {
                for y in 0..SIZE {
                    if self.is_valid_placement(x, y, turn) {
                        moves.push(Move::Add { x, y });
                    }
                }
            }
        } else {
            for from_x in 0..SIZE {
                for from_y in 0..SIZE {
                    if self.tile_at(from_x, from_y) != Some(turn) {
                        continue;
                    }
                    self.remove_tile(from_x, from_y);
                    for x in 0..SIZE {
                        for y in 0..SIZE {
                            if (x != from_x || y != from_y)
                                && self.is_valid_placement(x, y, turn)
                            {
                                moves.push(Move::Step { x, y, from_x, from_y });
                            }
                        }
                    }
                    self.set_tile(from_x, from_y, turn);
                }
            }
        }
        moves
    }

    /// All positions holding `color` tiles. Black is collected row by row,
    /// White column by column; the chain search starts from these in order,
    /// so the traversal difference keeps each color's tie-breaks stable
    /// along its own goal axis.
    pub fn tiles_of(&self, color: Color) -> Vec<Pos> {
        let mut tiles = Vec::with_capacity(TILES_PER_PLAYER as usize);
        for i in 0..SIZE {
            for j in 0..SIZE {
                match color {
                    Color::Black => {
                        if self.tile_at(j, i) == Some(Color::Black) {
                            tiles.push(Pos::new(j, i));
                        }
                    }
                    Color::White => {
                        if self.tile_at(i, j) == Some(Color::White) {
                            tiles.push(Pos::new(i, j));
                        }
                    }
                }
            }
        }
        tiles
    }

    // =========================================================================
    // Scoring and identity
    // =========================================================================

    /// Heuristic score of this position from `color`'s perspective.
    pub fn evaluate(&self, color: Color) -> i32 {
        evaluator::evaluate(self, color).score
    }

    /// Deterministic hash of the full occupancy (cells plus colors), used
    /// to key the learned weight table. Stable across runs and processes.
    pub fn signature(&self) -> u64 {
        // FNV-1a over (color tag, x, y) of every occupied cell in scan order.
        const FNV_OFFSET: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;
        let mut hash = FNV_OFFSET;
        let mix = |byte: u8, hash: &mut u64| {
            *hash = (*hash ^ byte as u64).wrapping_mul(FNV_PRIME);
        };
        for x in 0..SIZE {
            for y in 0..SIZE {
                let tag = match self.tile_at(x, y) {
                    Some(Color::Black) => b'B',
                    Some(Color::White) => b'W',
                    None => continue,
                };
                mix(tag, &mut hash);
                mix(x as u8, &mut hash);
                mix(y as u8, &mut hash);
            }
        }
        hash
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for y in 0..SIZE {
            write!(f, "{y} ")?;
            for x in 0..SIZE {
                let ch = match self.tile_at(x, y) {
                    Some(Color::Black) => 'B',
                    Some(Color::White) => 'W',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
