//! Netstone: an automated player for the Network connection game.
//!
//! ## Usage
//!
//! - `netstone` - Play a short machine-vs-machine demo game
//! - `netstone demo` - Same as above
//! - `netstone selfplay --games 10 --weights weights.json` - Self-play
//!   training with outcome learning and a persistent weight store

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use netstone::board::Color;
use netstone::constants::{DEFAULT_SEARCH_DEPTH, MAX_GAME_LEN};
use netstone::learning::WeightTable;
use netstone::player::MachinePlayer;

/// Netstone: an automated Network player
#[derive(Parser)]
#[command(name = "netstone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one machine-vs-machine game, printing the board as it goes
    Demo {
        /// Search depth for both players
        #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
        depth: u32,
    },
    /// Run self-play training games, learning position weights
    Selfplay {
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// Search depth for both players
        #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
        depth: u32,
        /// Weight store to load at startup and save after each game
        #[arg(long)]
        weights: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Selfplay {
            games,
            depth,
            weights,
        }) => run_selfplay(games, depth, weights),
        Some(Commands::Demo { depth }) => run_demo(depth),
        None => run_demo(DEFAULT_SEARCH_DEPTH),
    }
}

/// Play one game between two machine players and print the exchange.
fn run_demo(depth: u32) -> Result<()> {
    println!("Netstone: machine vs machine, search depth {depth}\n");
    let mut white = MachinePlayer::with_depth(Color::White, depth);
    let mut black = MachinePlayer::with_depth(Color::Black, depth);

    for turn in 1..=MAX_GAME_LEN {
        let Some(mv) = white.choose_move() else { break };
        println!("turn {turn}: white {mv}");
        black.opponent_move(&mv);
        if let Some(winner) = white.winner() {
            println!("{}", white.board());
            println!("{winner:?} wins");
            return Ok(());
        }

        let Some(mv) = black.choose_move() else { break };
        println!("turn {turn}: black {mv}");
        white.opponent_move(&mv);
        if let Some(winner) = white.winner() {
            println!("{}", white.board());
            println!("{winner:?} wins");
            return Ok(());
        }
    }
    println!("{}", white.board());
    println!("no winner within {MAX_GAME_LEN} turns");
    Ok(())
}

/// Self-play training loop: the white player carries the weight table,
/// learns from each finished game, and the store is saved as games end.
fn run_selfplay(games: u32, depth: u32, store: Option<PathBuf>) -> Result<()> {
    let table = match &store {
        Some(path) => WeightTable::load(path),
        None => WeightTable::new(),
    };
    info!("starting self-play: {games} games, depth {depth}, {} known positions", table.len());

    let mut white = MachinePlayer::with_depth(Color::White, depth);
    let mut black = MachinePlayer::with_depth(Color::Black, depth);
    white.attach_weights(table);
    let mut rng = fastrand::Rng::new();

    for game in 1..=games {
        white.start_new_game();
        black.start_new_game();

        let mut winner = None;
        let mut moves_played = 0;

        // Randomize the first move of each side so successive games
        // diverge; otherwise deterministic search replays one game and
        // the weight table never sees a fresh position.
        for ply in 0..2 {
            let mut scratch = white.board().clone();
            let candidates = scratch.valid_moves();
            let mv = candidates[rng.usize(..candidates.len())];
            if ply == 0 {
                white.force_move(&mv);
                black.opponent_move(&mv);
            } else {
                black.force_move(&mv);
                white.opponent_move(&mv);
            }
            moves_played += 1;
        }

        while winner.is_none() && moves_played < MAX_GAME_LEN {
            let Some(mv) = white.choose_move() else { break };
            black.opponent_move(&mv);
            moves_played += 1;
            winner = white.winner();
            if winner.is_some() {
                break;
            }

            let Some(mv) = black.choose_move() else { break };
            white.opponent_move(&mv);
            moves_played += 1;
            winner = white.winner();
        }

        match winner {
            Some(side) => {
                info!("game {game}: {side:?} wins after {moves_played} moves");
                white.learn(side);
            }
            None => info!("game {game}: no result after {moves_played} moves"),
        }

        if let (Some(path), Some(table)) = (&store, white.weights()) {
            table.save(path)?;
        }
    }
    Ok(())
}
