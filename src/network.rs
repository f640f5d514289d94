//! Constrained chain search: network detection and longest-chain discovery.
//!
//! A network is a chain of six or more same-color tiles whose endpoints lie
//! in opposite goal bands, where consecutive tiles are connected under
//! three constraints: the walk must turn off its previous axis at every
//! hop, the straight line between two tiles must not pass over an opponent
//! tile, and two tiles in the same goal band are never connected. Finding
//! one ends the game; failing that, the longest chain discovered feeds the
//! evaluator as a heuristic signal.

use crate::board::{Board, Color};
use crate::constants::NETWORK_MIN_LEN;
use crate::neighbors::Neighbors;
use crate::position::{is_opposite_goal, is_same_goal, same_line, Pos};

/// Result of a chain search: the best chain found and whether it completes
/// a network.
#[derive(Debug, Clone)]
pub struct Chain {
    pub tiles: Vec<Pos>,
    pub is_network: bool,
}

impl Chain {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// A partial path on the DFS frontier. Transient, one per branch.
struct SearchNode {
    pos: Pos,
    chain: Vec<Pos>,
}

/// Tiles connected to `p` under the chain rules, found by ray-casting
/// outward ring by ring along the 8 directions.
///
/// Per ring: a candidate on the same axis `p` was reached from is skipped
/// (no straight continuations); an opponent tile kills its whole direction
/// for every further ring; a same-color tile in the same goal band as `p`
/// is skipped but leaves the ray alive; any other same-color tile joins the
/// result, recording the current ring radius as its `space`. Empty cells
/// leave the ray probing further out.
pub fn connected_tiles(board: &Board, p: &Pos) -> Vec<Pos> {
    let color = match board.tile_at_pos(p) {
        Some(c) => c,
        None => return Vec::new(),
    };
    let other = color.opponent();
    let mut connected = Vec::with_capacity(8);
    let mut neighbors = Neighbors::of(p);
    while !neighbors.is_empty() {
        let mut blocked = Vec::new();
        for n in neighbors.iter() {
            if board.tile_at_pos(n).is_none() || same_line(p, n) {
                continue;
            }
            if board.tile_at_pos(n) == Some(other) {
                blocked.push(n.dir.unwrap());
                continue;
            }
            if is_same_goal(p, n) {
                continue;
            }
            let mut found = *n;
            found.space = neighbors.radius();
            connected.push(found);
        }
        for dir in blocked {
            neighbors.remove(dir);
        }
        neighbors.advance();
    }
    connected
}

/// Depth-first search for a network of `color`, or failing that the
/// longest chain discovered.
///
/// Starts a walk from every tile of the color in the board's fixed
/// tile-list order; an explicit stack holds partial paths. Path membership
/// is by coordinate, so a cell is never revisited within one path. A tile
/// in a goal band terminates its branch (goal tiles are endpoints only).
/// The first network found is returned immediately; tie-breaks between
/// equal-length chains go to the first found.
pub fn find_chain(board: &Board, color: Color) -> Chain {
    let tiles = board.tiles_of(color);
    let mut best: Vec<Pos> = Vec::new();
    for p in &tiles {
        let start = SearchNode {
            pos: *p,
            chain: vec![*p],
        };
        let mut frontier = vec![start];
        while let Some(current) = frontier.pop() {
            for next in connected_tiles(board, &current.pos) {
                if current.chain.contains(&next) {
                    continue;
                }
                let mut link = current.chain.clone();
                link.push(next);
                if is_network(&link) {
                    return Chain {
                        tiles: link,
                        is_network: true,
                    };
                }
                if link.len() > best.len() {
                    best = link.clone();
                }
                if !next.is_goal() {
                    frontier.push(SearchNode {
                        pos: next,
                        chain: link,
                    });
                }
            }
        }
    }
    Chain {
        tiles: best,
        is_network: false,
    }
}

/// A chain is a network when it spans at least [`NETWORK_MIN_LEN`] tiles
/// and its endpoints lie in opposite goal bands.
fn is_network(chain: &[Pos]) -> bool {
    if chain.len() < NETWORK_MIN_LEN {
        return false;
    }
    is_opposite_goal(&chain[0], &chain[chain.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Direction;

    fn board_with(white: &[(i32, i32)], black: &[(i32, i32)]) -> Board {
        let mut b = Board::new();
        for &(x, y) in white {
            b.set_tile(x, y, Color::White);
        }
        for &(x, y) in black {
            b.set_tile(x, y, Color::Black);
        }
        b
    }

    #[test]
    fn adjacent_same_color_tile_is_connected() {
        let b = board_with(&[(3, 3), (4, 4)], &[]);
        let conn = connected_tiles(&b, &Pos::new(3, 3));
        assert_eq!(conn.len(), 1);
        assert_eq!(conn[0], Pos::new(4, 4));
        assert_eq!(conn[0].space, 0);
    }

    #[test]
    fn distant_tile_records_ring_gap() {
        let b = board_with(&[(3, 3), (3, 6)], &[]);
        let conn = connected_tiles(&b, &Pos::new(3, 3));
        assert_eq!(conn.len(), 1);
        assert_eq!(conn[0].space, 2);
        assert_eq!(conn[0].dir, Some(Direction::South));
    }

    #[test]
    fn opponent_tile_blocks_the_whole_ray() {
        // White at (3,3) and (3,6) with Black at (3,4) in between.
        let b = board_with(&[(3, 3), (3, 6)], &[(3, 4)]);
        let conn = connected_tiles(&b, &Pos::new(3, 3));
        assert!(conn.is_empty());
    }

    #[test]
    fn straight_continuation_is_rejected() {
        // Walk arrived at (3,3) heading South; (3,5) continues the same
        // axis and must not connect, while (5,3) turns a corner and does.
        let b = board_with(&[(3, 3), (3, 5), (5, 3)], &[]);
        let tail = {
            let mut p = Pos::with_dir(3, 3, Direction::South);
            p.space = 0;
            p
        };
        let conn = connected_tiles(&b, &tail);
        assert_eq!(conn.len(), 1);
        assert_eq!(conn[0], Pos::new(5, 3));
    }

    #[test]
    fn same_goal_tiles_are_not_connected() {
        // Two white tiles in the top goal row.
        let b = board_with(&[(3, 0), (4, 0)], &[]);
        let conn = connected_tiles(&b, &Pos::new(3, 0));
        assert!(conn.is_empty());
    }

    #[test]
    fn six_tile_goal_to_goal_chain_is_a_network() {
        // White connects rows 0 and 7, turning a corner at every hop.
        let b = board_with(
            &[(2, 0), (2, 2), (4, 2), (4, 4), (2, 4), (2, 7)],
            &[],
        );
        let chain = find_chain(&b, Color::White);
        assert!(chain.is_network);
        assert!(chain.len() >= NETWORK_MIN_LEN);
        assert!(chain.tiles[0].is_goal());
        assert!(chain.tiles[chain.len() - 1].is_goal());
        assert!(is_opposite_goal(
            &chain.tiles[0],
            &chain.tiles[chain.len() - 1]
        ));
    }

    #[test]
    fn five_tile_chain_is_not_a_network() {
        let b = board_with(&[(2, 0), (2, 2), (4, 2), (4, 4), (2, 4)], &[]);
        let chain = find_chain(&b, Color::White);
        assert!(!chain.is_network);
        assert_eq!(chain.len(), 5);
    }

    #[test]
    fn blocked_network_falls_back_to_longest_chain() {
        // Same shape as the network test, but Black cuts the final link
        // from (2,4) to (2,7).
        let b = board_with(
            &[(2, 0), (2, 2), (4, 2), (4, 4), (2, 4), (2, 7)],
            &[(2, 5)],
        );
        let chain = find_chain(&b, Color::White);
        assert!(!chain.is_network);
        assert!(chain.len() < NETWORK_MIN_LEN);
    }

    #[test]
    fn goal_tiles_are_endpoints_only() {
        // (2,7) sits in the goal band. Chains may end there but the walk
        // never continues out of it, so the longest chain routes through
        // the interior tiles first and finishes at the goal.
        let b = board_with(&[(2, 4), (2, 7), (5, 4)], &[]);
        let chain = find_chain(&b, Color::White);
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_network);
        assert_eq!(chain.tiles[chain.len() - 1], Pos::new(2, 7));
    }

    #[test]
    fn empty_color_yields_empty_chain() {
        let b = Board::new();
        let chain = find_chain(&b, Color::White);
        assert!(chain.is_empty());
        assert!(!chain.is_network);
    }
}
