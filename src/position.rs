//! Coordinate, direction, and goal-membership primitives.
//!
//! A [`Pos`] is a cell coordinate enriched with chain-walk bookkeeping: the
//! direction it was reached from and the ring-distance (`space`) to the
//! previous chain node. Equality and hashing deliberately cover only the
//! coordinates, so chain-membership tests treat two `Pos` values at the same
//! cell as the same tile regardless of how the walk arrived there.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::constants::{SIZE, UNIT_OFFSETS};

/// One of the 8 compass directions. The discriminants index
/// [`UNIT_OFFSETS`] and the slot array inside `Neighbors`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    NorthWest = 0,
    West = 1,
    SouthWest = 2,
    North = 3,
    South = 4,
    NorthEast = 5,
    East = 6,
    SouthEast = 7,
}

/// The four axis groups. Two directions on the same axis describe a
/// straight line, which the chain rules forbid continuing along.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
    DiagonalNwSe,
    DiagonalNeSw,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::North,
        Direction::South,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
    ];

    /// Unit (dx, dy) offset for this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        UNIT_OFFSETS[self as usize]
    }

    /// Axis group of this direction.
    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Vertical,
            Direction::East | Direction::West => Axis::Horizontal,
            Direction::NorthWest | Direction::SouthEast => Axis::DiagonalNwSe,
            Direction::NorthEast | Direction::SouthWest => Axis::DiagonalNeSw,
        }
    }
}

/// Goal membership side. `A` is the row/column 0 band, `B` the opposite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Goal {
    A,
    B,
}

impl Goal {
    pub fn opposite(self) -> Goal {
        match self {
            Goal::A => Goal::B,
            Goal::B => Goal::A,
        }
    }
}

/// Goal membership of a cell, derived purely from its coordinates. The
/// x == 0 / y == 0 band is checked first, so the (0, 7) and (7, 0) corners
/// resolve to `A`; corners never hold tiles, so the choice is inert.
pub fn goal_at(x: i32, y: i32) -> Option<Goal> {
    if x == 0 || y == 0 {
        return Some(Goal::A);
    }
    if x == SIZE - 1 || y == SIZE - 1 {
        return Some(Goal::B);
    }
    None
}

/// True if both cells are in goals on opposite sides.
pub fn is_opposite_goal(a: &Pos, b: &Pos) -> bool {
    match (a.goal, b.goal) {
        (Some(g1), Some(g2)) => g1.opposite() == g2,
        _ => false,
    }
}

/// True if both cells are in the same goal band.
pub fn is_same_goal(a: &Pos, b: &Pos) -> bool {
    match (a.goal, b.goal) {
        (Some(g1), Some(g2)) => g1 == g2,
        _ => false,
    }
}

/// True if `b`'s direction lies on the same axis as the direction `a` was
/// reached from. A start tile (no incoming direction) matches nothing.
pub fn same_line(a: &Pos, b: &Pos) -> bool {
    match (a.dir, b.dir) {
        (Some(da), Some(db)) => da.axis() == db.axis(),
        _ => false,
    }
}

/// A board coordinate with chain-walk metadata.
#[derive(Copy, Clone, Debug)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
    /// Direction this cell was reached from during a chain walk.
    pub dir: Option<Direction>,
    /// Ring-distance from the previous chain node (0 = adjacent).
    pub space: u32,
    /// Goal membership, derived from (x, y).
    pub goal: Option<Goal>,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Pos {
            x,
            y,
            dir: None,
            space: 0,
            goal: goal_at(x, y),
        }
    }

    pub fn with_dir(x: i32, y: i32, dir: Direction) -> Self {
        Pos {
            x,
            y,
            dir: Some(dir),
            space: 0,
            goal: goal_at(x, y),
        }
    }

    /// True if this cell is inside either goal band.
    #[inline]
    pub fn is_goal(&self) -> bool {
        self.goal.is_some()
    }

    /// True if (x, y) lies on the board.
    #[inline]
    pub fn on_board(x: i32, y: i32) -> bool {
        x >= 0 && x < SIZE && y >= 0 && y < SIZE
    }
}

// Coordinate-only equality: chain membership must not distinguish two
// visits to the same cell that arrived from different directions.
impl PartialEq for Pos {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Pos {}

impl Hash for Pos {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dir {
            Some(d) => write!(f, "({},{}) {:?}", self.x, self.y, d),
            None => write!(f, "({},{})", self.x, self.y),
        }
    }
}
