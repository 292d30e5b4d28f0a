//! AI Wargame core - rules engine and adversarial search
//!
//! This crate provides the core game logic for the wargame:
//! - Grid geometry (square board with row/col coordinates)
//! - Unit types, damage and repair tables
//! - Game state, legality predicates and action resolution
//! - Position evaluation with three interchangeable heuristics
//! - Minimax alpha-beta search with node-count statistics

pub mod ai;
pub mod board;
pub mod eval;
pub mod game;
pub mod options;
pub mod units;

// Re-exports for convenient access
pub use ai::{SearchStats, Searcher, Suggestion};
pub use board::{Coord, CoordPair};
pub use eval::{Heuristic, MAX_SCORE, MIN_SCORE};
pub use game::{ActionKind, Game, InvalidMove};
pub use options::Options;
pub use units::{Player, Unit, UnitType, MAX_HEALTH};
