//! Learned position weights: recording, outcome credit, and persistence.
//!
//! The weight table maps board signatures to positive multipliers that
//! scale the evaluator's heuristic score. After each finished game the
//! signatures seen during play are credited by parity: positions reached
//! by the winner's moves double their weight, the loser's halve. This is
//! plain credit assignment with no normalization; weights drift without
//! bound over many games, which the design accepts.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::board::Color;

/// Mapping from board signature to score multiplier. Unknown signatures
/// read as 1.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: HashMap<u64, f64>,
}

impl WeightTable {
    pub fn new() -> Self {
        WeightTable::default()
    }

    /// Multiplier for a signature, defaulting to 1.0.
    pub fn get(&self, signature: u64) -> f64 {
        self.weights.get(&signature).copied().unwrap_or(1.0)
    }

    pub fn set(&mut self, signature: u64, weight: f64) {
        self.weights.insert(signature, weight);
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Load a table from a JSON store. A missing file is a normal first
    /// run; a corrupt one is dropped with a warning. Both fall back to a
    /// fresh table rather than aborting.
    pub fn load(path: &Path) -> WeightTable {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no weight store at {}, starting fresh", path.display());
                return WeightTable::new();
            }
            Err(err) => {
                warn!(
                    "could not read weight store {}: {err}, starting fresh",
                    path.display()
                );
                return WeightTable::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(table) => table,
            Err(err) => {
                warn!(
                    "corrupt weight store {}: {err}, starting fresh",
                    path.display()
                );
                WeightTable::new()
            }
        }
    }

    /// Persist the table as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)
            .with_context(|| format!("writing weight store {}", path.display()))
    }

    /// Credit a finished game. Even-indexed signatures in the record were
    /// produced by the first mover's moves; every signature whose parity
    /// matches the winner doubles its weight, the rest halve.
    pub fn apply_outcome(&mut self, record: &GameRecord, winner: Color) {
        let winner_parity = if winner == record.first_mover() { 0 } else { 1 };
        for (i, &signature) in record.signatures().iter().enumerate() {
            let weight = self.weights.entry(signature).or_insert(1.0);
            if i % 2 == winner_parity {
                *weight *= 2.0;
            } else {
                *weight /= 2.0;
            }
        }
    }
}

/// The board signatures observed move by move during one game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    first_mover: Color,
    signatures: Vec<u64>,
}

impl GameRecord {
    pub fn new(first_mover: Color) -> Self {
        GameRecord {
            first_mover,
            signatures: Vec::new(),
        }
    }

    /// Append the signature reached by the latest applied move.
    pub fn push(&mut self, signature: u64) {
        self.signatures.push(signature);
    }

    pub fn first_mover(&self) -> Color {
        self.first_mover
    }

    pub fn signatures(&self) -> &[u64] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn clear(&mut self) {
        self.signatures.clear();
    }
}
