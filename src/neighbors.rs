//! Neighbor enumeration with ring expansion.
//!
//! A [`Neighbors`] set starts as the (up to 8) cells adjacent to an origin
//! and supports `advance`, which pushes every surviving slot one unit
//! further along its own direction. The chain search uses this to ray-cast
//! outward from a tile, ring by ring, looking for the next tile in a
//! straight line without knowing distances in advance.

use crate::constants::UNIT_OFFSETS;
use crate::position::{Direction, Pos};

/// The 8 directional probe slots around an origin cell. A slot goes dead
/// (None) when it walks off the board or the search prunes its direction.
pub struct Neighbors {
    slots: [Option<Pos>; 8],
    live: usize,
    radius: u32,
}

impl Neighbors {
    pub fn new(x: i32, y: i32) -> Self {
        let mut slots = [None; 8];
        let mut live = 0;
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (nx, ny) = (x + dx, y + dy);
            if Pos::on_board(nx, ny) {
                slots[dir as usize] = Some(Pos::with_dir(nx, ny, dir));
                live += 1;
            }
        }
        Neighbors {
            slots,
            live,
            radius: 0,
        }
    }

    pub fn of(p: &Pos) -> Self {
        Neighbors::new(p.x, p.y)
    }

    /// Move every live slot one unit further out along its direction,
    /// dropping slots that leave the board, and grow the radius.
    pub fn advance(&mut self) {
        self.radius += 1;
        for i in 0..self.slots.len() {
            if let Some(p) = self.slots[i] {
                let (dx, dy) = UNIT_OFFSETS[i];
                let (nx, ny) = (p.x + dx, p.y + dy);
                if Pos::on_board(nx, ny) {
                    self.slots[i] = Some(Pos::with_dir(nx, ny, p.dir.unwrap()));
                } else {
                    self.remove(p.dir.unwrap());
                }
            }
        }
    }

    /// Ring distance of the current slots from the origin. 0 means the
    /// slots are immediately adjacent.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn get(&self, dir: Direction) -> Option<&Pos> {
        self.slots[dir as usize].as_ref()
    }

    /// Kill the slot in the given direction.
    pub fn remove(&mut self, dir: Direction) {
        if self.slots[dir as usize].take().is_some() {
            self.live -= 1;
        }
    }

    /// True once every slot is dead.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterate over the live slots in direction order.
    pub fn iter(&self) -> impl Iterator<Item = &Pos> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }
}
