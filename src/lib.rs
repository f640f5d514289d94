//! Netstone: an automated player for the Network connection game.
//!
//! Network is played on an 8x8 board where each side tries to connect its
//! two goal bands with a chain of six or more tiles, turning a corner at
//! every hop. This crate implements the decision engine: board state with
//! exact apply/undo, legal-move generation under the placement rules, the
//! constrained chain search that detects networks, a heuristic evaluator,
//! alpha-beta game-tree search, and an outcome-driven weight-learning
//! loop.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and engine parameters
//! - [`position`] - Coordinate, direction, and goal primitives
//! - [`neighbors`] - 8-direction neighbor sets with ring expansion
//! - [`board`] - Board state, rules, move generation, apply/undo
//! - [`network`] - Chain search and network detection
//! - [`evaluator`] - Heuristic position scoring
//! - [`minimax`] - Alpha-beta game-tree search
//! - [`player`] - The machine player facade
//! - [`learning`] - Weight table, outcome credit, persistence
//!
//! ## Example
//!
//! ```
//! use netstone::board::Color;
//! use netstone::player::MachinePlayer;
//!
//! // White moves first; have the machine pick its opening.
//! let mut white = MachinePlayer::with_depth(Color::White, 1);
//! let mv = white.choose_move().expect("the opening always has moves");
//! println!("white plays {mv}");
//! println!("{}", white.board());
//! ```

pub mod board;
pub mod constants;
pub mod evaluator;
pub mod learning;
pub mod minimax;
pub mod neighbors;
pub mod network;
pub mod player;
pub mod position;
