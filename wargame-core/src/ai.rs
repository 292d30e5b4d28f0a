//! Minimax alpha-beta search and its statistics

use crate::board::CoordPair;
use crate::eval::{MAX_SCORE, MIN_SCORE};
use crate::game::Game;
use crate::units::Player;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Default RNG seed for move-order shuffling
const DEFAULT_SEED: u64 = 42;

// ============================================================================
// STATISTICS
// ============================================================================

/// Node counters accumulated across searches.
///
/// Owned by the `Searcher` and threaded through the recursion by
/// mutable reference; a future parallel search must give each worker
/// its own accumulator and combine them afterward.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    /// Internal-node expansions keyed by remaining depth
    /// (1 = just above the leaves)
    pub evals_per_depth: FxHashMap<u32, u64>,
    /// Leaf evaluations
    pub leaf_nodes: u64,
    /// Total time spent in completed, in-budget searches
    pub total_seconds: f64,
}

impl SearchStats {
    fn record_expansion(&mut self, depth: u32) {
        *self.evals_per_depth.entry(depth).or_insert(0) += 1;
    }

    fn record_leaf(&mut self) {
        self.leaf_nodes += 1;
    }

    /// Total expansions across all depths
    pub fn cumulative_evals(&self) -> u64 {
        self.evals_per_depth.values().sum()
    }

    fn sorted_depths(&self) -> Vec<u32> {
        let mut depths: Vec<u32> = self.evals_per_depth.keys().copied().collect();
        depths.sort_unstable();
        depths
    }

    /// `depth=count` pairs in ascending depth order
    pub fn evals_by_depth(&self) -> String {
        self.sorted_depths()
            .iter()
            .map(|d| format!("{}={}", d, self.evals_per_depth[d]))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Per-depth share of all expansions, in percent (one decimal)
    pub fn percent_evals_by_depth(&self) -> String {
        let total = self.cumulative_evals();
        if total == 0 {
            return String::new();
        }
        self.sorted_depths()
            .iter()
            .map(|d| {
                let pct = self.evals_per_depth[d] as f64 / total as f64 * 100.0;
                format!("{}={:.1}%", d, pct)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Non-root nodes divided by non-leaf nodes
    pub fn average_branching_factor(&self) -> f64 {
        let total = self.cumulative_evals();
        let internal = total.saturating_sub(self.leaf_nodes);
        if total == 0 || internal == 0 {
            return 0.0;
        }
        (total - 1) as f64 / internal as f64
    }

    /// Evaluations per second over the accumulated search time
    pub fn evals_per_second(&self) -> f64 {
        if self.total_seconds <= 0.0 {
            return 0.0;
        }
        self.cumulative_evals() as f64 / self.total_seconds
    }
}

// ============================================================================
// SEARCHER
// ============================================================================

/// Outcome of a completed, in-budget search
#[derive(Clone, Copy, Debug)]
pub struct Suggestion {
    pub mv: CoordPair,
    pub score: i32,
    pub elapsed: Duration,
}

/// Minimax alpha-beta engine.
///
/// Purely synchronous recursive tree walk; each node operates on its
/// own cloned game state. Statistics persist across turns for
/// end-of-game reporting.
pub struct Searcher {
    rng: ChaCha8Rng,
    stats: SearchStats,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search the current position at the configured depth and return
    /// the best move for the side to move.
    ///
    /// The wall-clock budget is checked only after the depth-limited
    /// search completes; an over-budget result is discarded and reported
    /// as `None`, which the caller must treat as a timeout loss, not as
    /// "no legal moves".
    pub fn suggest_move(&mut self, game: &Game) -> Option<Suggestion> {
        let start = Instant::now();
        let (score, mv) = self.minimax(
            game,
            game.options.max_depth,
            true,
            game.next_player(),
            MIN_SCORE,
            MAX_SCORE,
        );
        let elapsed = start.elapsed();
        if elapsed.as_secs_f64() > game.options.max_seconds {
            return None;
        }
        self.stats.total_seconds += elapsed.as_secs_f64();
        mv.map(|mv| Suggestion { mv, score, elapsed })
    }

    /// Recursive minimax. `maximizing` flips per ply; the heuristic is
    /// always evaluated from `perspective`'s viewpoint.
    fn minimax(
        &mut self,
        game: &Game,
        depth: u32,
        maximizing: bool,
        perspective: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<CoordPair>) {
        if depth == 0 || game.has_winner().is_some() {
            self.stats.record_leaf();
            return (game.options.heuristic.evaluate(game, perspective), None);
        }

        let mut moves = game.move_candidates(game.next_player());
        if game.options.randomize_moves {
            moves.shuffle(&mut self.rng);
        }

        let mut best_score = if maximizing { MIN_SCORE } else { MAX_SCORE };
        let mut best_move = None;

        for mv in moves {
            self.stats.record_expansion(depth);
            let mut child = game.clone();
            // generator candidates are expected to resolve; skip if one does not
            if child.perform_move(mv).is_err() {
                continue;
            }
            child.next_turn();
            let (score, _) = self.minimax(&child, depth - 1, !maximizing, perspective, alpha, beta);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                if game.options.alpha_beta {
                    alpha = alpha.max(score);
                    if beta <= alpha {
                        break;
                    }
                }
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                if game.options.alpha_beta {
                    beta = beta.min(score);
                    if beta <= alpha {
                        break;
                    }
                }
            }
        }

        (best_score, best_move)
    }
}

// ============================================================================
// TESTS
// ============================================================================
