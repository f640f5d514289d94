//! Constants for board geometry, rule limits, and search parameters.
//!
//! The board is a fixed 8x8 grid. The four corner squares are dead cells
//! that never receive a tile, and the edge bands (minus corners) form the
//! goal regions: columns 0 and 7 belong to Black, rows 0 and 7 to White.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (SIZE x SIZE).
pub const SIZE: i32 = 8;

/// Number of tiles each player may have on the board at once. Once a player
/// has placed all of them, further moves relocate an existing tile.
pub const TILES_PER_PLAYER: u32 = 10;

/// Minimum number of tiles in a goal-to-goal chain that counts as a network.
pub const NETWORK_MIN_LEN: usize = 6;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default game-tree search depth.
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

/// Cap on moves per game in self-play, so a stalled step-phase shuffle
/// cannot loop forever.
pub const MAX_GAME_LEN: usize = 200;

/// Score sentinel for a decided position (a completed network). The
/// magnitude leaves headroom for the depth bias applied at terminal nodes,
/// so `NETWORK_WIN - depth` still dominates every heuristic score.
pub const NETWORK_WIN: i32 = 1_000_000;

/// Chain length beyond which extra tiles earn no additional score.
pub const CHAIN_LEN_CAP: usize = 6;

/// Evaluator bonus for a chain longer than 4 anchored in opposite goals.
pub const ANCHORED_CHAIN_BONUS: i32 = 5;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Unit offsets for the 8 compass directions, indexed by `Direction`.
/// Order: NW, W, SW, N, S, NE, E, SE. `x` grows rightward, `y` downward.
pub const UNIT_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), // NW
    (-1, 0),  // W
    (-1, 1),  // SW
    (0, -1),  // N
    (0, 1),   // S
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
];
