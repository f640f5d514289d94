//! Integration tests for the netstone engine.
//!
//! These cover the engine's core contracts: apply/undo is an exact
//! inverse, generated moves never break the placement rules, network
//! detection and the evaluator's win sentinel agree, and alpha-beta
//! pruning never changes the value plain minimax would compute.

use netstone::board::{Board, Color, Move};
use netstone::constants::{NETWORK_WIN, SIZE, TILES_PER_PLAYER};
use netstone::evaluator;
use netstone::learning::{GameRecord, WeightTable};
use netstone::minimax::Searcher;
use netstone::network::find_chain;
use netstone::player::MachinePlayer;

// =============================================================================
// Helper functions
// =============================================================================

/// Build a board by placing tiles directly, bypassing the move rules.
/// The turn is left at White.
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

/// Play `moves` random legal moves from the opening, drawn with a seeded
/// generator so failures reproduce.
fn random_game(rng: &mut fastrand::Rng, moves: usize) -> Board {
    let mut board = Board::new();
    for _ in 0..moves {
        let candidates = board.valid_moves();
        if candidates.is_empty() {
            break;
        }
        let mv = candidates[rng.usize(..candidates.len())];
        assert!(board.execute_move(&mv), "generated move {mv} was rejected");
    }
    board
}

/// Size of the 8-connected same-color group containing (x, y).
fn group_size(board: &Board, x: i32, y: i32) -> usize {
    let color = match board.tile_at(x, y) {
        Some(c) => c,
        None => return 0,
    };
    let mut seen = vec![(x, y)];
    let mut stack = vec![(x, y)];
    while let Some((cx, cy)) = stack.pop() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (cx + dx, cy + dy);
                if nx < 0 || nx >= SIZE || ny < 0 || ny >= SIZE {
                    continue;
                }
                if board.tile_at(nx, ny) == Some(color) && !seen.contains(&(nx, ny)) {
                    seen.push((nx, ny));
                    stack.push((nx, ny));
                }
            }
        }
    }
    seen.len()
}

/// Assert the board satisfies every structural rule: empty corners, no
/// tile in its opponent's goal band, no connected group of three.
fn assert_rules_hold(board: &Board) {
    for &(x, y) in &[(0, 0), (0, 7), (7, 0), (7, 7)] {
        assert_eq!(board.tile_at(x, y), None, "corner ({x},{y}) is occupied");
    }
    for x in 0..SIZE {
        for y in 0..SIZE {
            match board.tile_at(x, y) {
                Some(Color::White) => {
                    assert!(x != 0 && x != SIZE - 1, "white tile in black goal ({x},{y})");
                }
                Some(Color::Black) => {
                    assert!(y != 0 && y != SIZE - 1, "black tile in white goal ({x},{y})");
                }
                None => continue,
            }
            assert!(
                group_size(board, x, y) <= 2,
                "cluster of {} at ({x},{y})",
                group_size(board, x, y)
            );
        }
    }
}

/// Plain depth-limited minimax without pruning, as an oracle for the
/// alpha-beta searcher. Mirrors the searcher's terminal handling exactly.
fn plain_minimax(board: &mut Board, color: Color, depth: u32, limit: u32, maximizing: bool) -> i32 {
    let eval = evaluator::evaluate(board, color);
    if depth > limit || eval.winner.is_some() {
        let mut score = eval.score;
        if score >= NETWORK_WIN {
            score -= depth as i32;
        } else if score <= -NETWORK_WIN {
            score += depth as i32;
        }
        return score;
    }
    let moves = board.valid_moves();
    if moves.is_empty() {
        return eval.score;
    }
    let mut best: Option<i32> = None;
    for mv in &moves {
        assert!(board.execute_move(mv));
        let score = plain_minimax(board, color, depth + 1, limit, !maximizing);
        board.undo_move(mv);
        best = Some(match best {
            None => score,
            Some(b) if maximizing => b.max(score),
            Some(b) => b.min(score),
        });
    }
    best.expect("at least one move was searched")
}

// =============================================================================
// Apply/undo discipline
// =============================================================================

#[test]
fn every_legal_move_round_trips_through_undo() {
    let mut rng = fastrand::Rng::with_seed(7);
    for game in 0..8 {
        let mut board = random_game(&mut rng, 6 + game * 4);
        let before = board.clone();
        for mv in board.clone().valid_moves() {
            assert!(board.execute_move(&mv), "legal move {mv} rejected");
            board.undo_move(&mv);
            assert!(board == before, "board changed after undo of {mv}");
        }
    }
}

#[test]
fn undo_restores_step_phase_boards() {
    // Drive one game deep into the step phase and round-trip every move.
    let mut rng = fastrand::Rng::with_seed(11);
    let mut board = random_game(&mut rng, 30);
    assert_eq!(board.tile_count(Color::White), TILES_PER_PLAYER);
    let before = board.clone();
    let moves = board.valid_moves();
    assert!(moves.iter().any(|m| matches!(m, Move::Step { .. })));
    for mv in moves {
        assert!(board.execute_move(&mv));
        board.undo_move(&mv);
        assert!(board == before);
    }
}

// =============================================================================
// Placement rules in randomized play
// =============================================================================

#[test]
fn random_games_never_violate_the_placement_rules() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..12 {
        let mut board = Board::new();
        for _ in 0..40 {
            let candidates = board.valid_moves();
            if candidates.is_empty() {
                break;
            }
            let mv = candidates[rng.usize(..candidates.len())];
            assert!(board.execute_move(&mv));
            assert_rules_hold(&board);
        }
    }
}

#[test]
fn evaluator_winner_always_agrees_with_the_chain_search() {
    let mut rng = fastrand::Rng::with_seed(13);
    for _ in 0..6 {
        let board = random_game(&mut rng, 24);
        let white_net = find_chain(&board, Color::White).is_network;
        let black_net = find_chain(&board, Color::Black).is_network;
        let eval = evaluator::evaluate(&board, Color::White);
        assert_eq!(eval.winner.is_some(), white_net || black_net);
        assert_eq!(eval.score.abs() >= NETWORK_WIN, white_net || black_net);
    }
}

// =============================================================================
// Empty-board move generation
// =============================================================================

#[test]
fn empty_board_moves_exclude_corners_and_opponent_goal() {
    let mut board = Board::new();
    // White to move: columns 0 and 7 (black's goal) are closed, which
    // also covers the four corners.
    let moves = board.valid_moves();
    assert_eq!(moves.len(), 48);
    for mv in &moves {
        let Move::Add { x, y } = *mv else {
            panic!("opening move generation produced a step")
        };
        assert!(x >= 1 && x <= 6, "white offered column {x}");
        assert!((0..SIZE).contains(&y));
    }
    // Every interior-column cell must be offered.
    for x in 1..=6 {
        for y in 0..SIZE {
            assert!(moves.contains(&Move::Add { x, y }), "missing ({x},{y})");
        }
    }

    // Black to move: rows 0 and 7 (white's goal) are closed instead.
    board.end_turn();
    let moves = board.valid_moves();
    assert_eq!(moves.len(), 48);
    for mv in &moves {
        let Move::Add { x: _, y } = *mv else {
            panic!("opening move generation produced a step")
        };
        assert!(y >= 1 && y <= 6, "black offered row {y}");
    }
}

// =============================================================================
// Cluster rule
// =============================================================================

#[test]
fn third_tile_adjacent_to_a_pair_is_rejected() {
    let mut player = MachinePlayer::with_depth(Color::White, 1);
    assert!(player.force_move(&Move::Add { x: 3, y: 3 })); // white
    assert!(player.force_move(&Move::Add { x: 6, y: 3 })); // black
    assert!(player.force_move(&Move::Add { x: 4, y: 3 })); // white pair
    assert!(player.force_move(&Move::Add { x: 6, y: 5 })); // black
    // (4,4) touches both white tiles: a cluster of three, rejected.
    assert!(!player.force_move(&Move::Add { x: 4, y: 4 }));
    // The rejection left the state unchanged: still white's turn.
    assert!(player.force_move(&Move::Add { x: 1, y: 1 }));
}

// =============================================================================
// Network detection and scoring
// =============================================================================

#[test]
fn known_network_scores_the_win_sentinel() {
    let board = board_with(&[(2, 0), (2, 2), (4, 2), (4, 4), (2, 4), (2, 7)], &[]);
    assert!(find_chain(&board, Color::White).is_network);
    let eval = evaluator::evaluate(&board, Color::White);
    assert_eq!(eval.score, NETWORK_WIN);
    assert_eq!(eval.winner, Some(Color::White));
    assert_eq!(evaluator::evaluate(&board, Color::Black).score, -NETWORK_WIN);
}

#[test]
fn five_tile_chain_scores_no_sentinel() {
    let board = board_with(&[(2, 0), (2, 2), (4, 2), (4, 4), (2, 4)], &[]);
    assert!(!find_chain(&board, Color::White).is_network);
    let eval = evaluator::evaluate(&board, Color::White);
    assert!(eval.winner.is_none());
    assert!(eval.score.abs() < NETWORK_WIN);
}

// =============================================================================
// Alpha-beta against plain minimax
// =============================================================================

#[test]
fn pruned_search_matches_plain_minimax() {
    let scenarios: [(&[(i32, i32)], &[(i32, i32)]); 3] = [
        (&[], &[]),
        (&[(2, 2), (4, 2)], &[(3, 5), (5, 5)]),
        (
            &[(2, 0), (2, 2), (4, 2), (4, 4)],
            &[(1, 5), (3, 6), (5, 3), (6, 6)],
        ),
    ];
    for (white, black) in scenarios {
        let mut board = board_with(white, black);
        let expected = plain_minimax(&mut board.clone(), Color::White, 0, 1, true);
        let best = Searcher::new(&mut board, Color::White, 1).best_move();
        assert_eq!(
            best.score, expected,
            "pruning changed the value for scenario {white:?} / {black:?}"
        );
    }
}

// =============================================================================
// Weight learning
// =============================================================================

#[test]
fn weight_update_follows_winner_parity() {
    let mut record = GameRecord::new(Color::White);
    for sig in [101, 202, 303, 404] {
        record.push(sig);
    }
    let mut table = WeightTable::new();
    table.apply_outcome(&record, Color::White);
    assert_eq!(table.get(101), 2.0);
    assert_eq!(table.get(202), 0.5);
    assert_eq!(table.get(303), 2.0);
    assert_eq!(table.get(404), 0.5);
}

#[test]
fn weighted_search_still_finds_the_winning_move() {
    let mut board = Board::new();
    let white_moves = [(2, 0), (2, 2), (4, 2), (4, 4), (2, 4)];
    let black_moves = [(1, 6), (3, 6), (5, 2), (5, 4), (6, 6)];
    for i in 0..5 {
        let (wx, wy) = white_moves[i];
        assert!(board.execute_move(&Move::Add { x: wx, y: wy }));
        let (bx, by) = black_moves[i];
        assert!(board.execute_move(&Move::Add { x: bx, y: by }));
    }
    let table = WeightTable::new();
    let best = Searcher::with_weights(&mut board, Color::White, 1, &table).best_move();
    assert!(best.score >= NETWORK_WIN - 2);
}
