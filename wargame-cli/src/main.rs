//! AI Wargame CLI
//!
//! Runs a game between any mix of human, computer and broker-relayed
//! players; every game writes a human-readable trace file.

mod broker;
mod play;
mod trace;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use wargame_core::{Heuristic, Options};

/// Who controls each side
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Human attacker vs human defender
    Manual,
    /// Human attacker vs computer defender
    Attacker,
    /// Computer attacker vs human defender
    Defender,
    /// Computer vs computer
    Auto,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Manual => write!(f, "attacker vs defender"),
            Mode::Attacker => write!(f, "attacker vs computer"),
            Mode::Defender => write!(f, "computer vs defender"),
            Mode::Auto => write!(f, "computer vs computer"),
        }
    }
}

#[derive(Parser)]
#[command(name = "wargame")]
#[command(about = "AI Wargame - tactical grid game with an adversarial search engine")]
struct Cli {
    /// Maximum search depth
    #[arg(long, default_value = "4")]
    depth: u32,

    /// Maximum search time in seconds
    #[arg(long, default_value = "5.0")]
    time: f64,

    /// Maximum number of turns before the Defender wins by attrition
    #[arg(long, default_value = "100")]
    turns: u32,

    /// Alpha-beta pruning on or off
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    alpha_beta: bool,

    /// Who controls each side
    #[arg(long, value_enum, default_value = "manual")]
    mode: Mode,

    /// Heuristic used by the search engine
    #[arg(long, default_value = "e0")]
    heuristic: Heuristic,

    /// Board dimension
    #[arg(long, default_value = "5")]
    dim: i8,

    /// Play via a game broker at this URL
    #[arg(long)]
    broker: Option<String>,

    /// RNG seed for move-order shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Load game options from a JSON file (overridden by the flags above)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    options.dim = cli.dim;
    options.max_depth = cli.depth;
    options.max_seconds = cli.time;
    options.max_turns = cli.turns;
    options.alpha_beta = cli.alpha_beta;
    options.heuristic = cli.heuristic;

    let session = play::Session {
        options,
        mode: cli.mode,
        broker_url: cli.broker,
        seed: cli.seed,
    };
    play::run(session)
}
