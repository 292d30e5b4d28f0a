//! Game configuration

use crate::eval::Heuristic;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rules and search configuration, fixed at game start
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Options {
    /// Board dimension (the board is dim x dim)
    pub dim: i8,
    /// Maximum search depth
    pub max_depth: u32,
    /// Wall-clock budget for one search, in seconds
    pub max_seconds: f64,
    /// Turn limit; reaching it hands the win to the Defender
    pub max_turns: u32,
    /// Alpha-beta pruning on/off
    pub alpha_beta: bool,
    /// Shuffle move candidates to avoid move-order bias
    pub randomize_moves: bool,
    /// Which evaluator the search uses
    pub heuristic: Heuristic,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dim: 5,
            max_depth: 4,
            max_seconds: 5.0,
            max_turns: 100,
            alpha_beta: true,
            randomize_moves: true,
            heuristic: Heuristic::E0,
        }
    }
}

impl Options {
    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let options: Options = serde_json::from_str(&content)?;
        Ok(options)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
