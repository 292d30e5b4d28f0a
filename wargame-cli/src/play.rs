//! Game session orchestration
//!
//! Runs the whole-game state machine: render the board, poll for a
//! winner after every completed turn, and hand each turn to a human,
//! the broker, or the search engine depending on the mode.

use std::io::{self, Write as _};
use std::thread::sleep;
use std::time::Duration;

use anyhow::{anyhow, Result};

use wargame_core::{CoordPair, Game, Options, Player, Searcher};

use crate::broker::BrokerClient;
use crate::trace::TraceWriter;
use crate::Mode;

const BROKER_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct Session {
    pub options: Options,
    pub mode: Mode,
    pub broker_url: Option<String>,
    pub seed: Option<u64>,
}

enum TurnOutcome {
    Played,
    Quit,
    Timeout,
}

// ============================================================================
// GAME LOOP
// ============================================================================

pub fn run(session: Session) -> Result<()> {
    let mut game = Game::new(session.options.clone());
    let mut trace = TraceWriter::create(&session.options, session.mode)?;
    trace.board(&game)?;

    let broker = session.broker_url.map(BrokerClient::new);
    let mut searcher = match session.seed {
        Some(seed) => Searcher::with_seed(seed),
        None => Searcher::new(),
    };

    loop {
        println!("\n{game}");
        if let Some(winner) = game.has_winner() {
            let line = format!("{winner} wins in {} turns!", game.turns_played());
            println!("{line}");
            trace.line(&line)?;
            break;
        }

        let outcome = if is_human_turn(session.mode, &game) {
            match &broker {
                Some(broker) => broker_turn(&mut game, broker, &mut trace)?,
                None => human_turn(&mut game, &mut trace)?,
            }
        } else {
            computer_turn(&mut game, &mut searcher, broker.as_ref(), &mut trace)?
        };

        match outcome {
            TurnOutcome::Played => trace.board(&game)?,
            TurnOutcome::Quit => {
                tracing::info!("game aborted by player");
                trace.line("Game aborted.")?;
                break;
            }
            TurnOutcome::Timeout => {
                let loser = game.next_player();
                let line = format!(
                    "{loser} exceeded the search time budget. {} wins!",
                    loser.opponent()
                );
                println!("{line}");
                trace.line(&line)?;
                break;
            }
        }
    }
    Ok(())
}

fn is_human_turn(mode: Mode, game: &Game) -> bool {
    match mode {
        Mode::Manual => true,
        Mode::Attacker => game.next_player() == Player::Attacker,
        Mode::Defender => game.next_player() == Player::Defender,
        Mode::Auto => false,
    }
}

// ============================================================================
// TURN HANDLERS
// ============================================================================

/// Read moves from stdin until one resolves; `q` aborts the game
fn human_turn(game: &mut Game, trace: &mut TraceWriter) -> Result<TurnOutcome> {
    let player = game.next_player();
    loop {
        print!("Player {player}, enter your move (enter q to quit): ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(TurnOutcome::Quit);
        }
        let input = input.trim();
        if input == "q" {
            return Ok(TurnOutcome::Quit);
        }
        let mv: CoordPair = match input.parse() {
            Ok(mv) => mv,
            Err(err) => {
                println!("Invalid coordinates ({err})! Try again.");
                continue;
            }
        };
        match game.perform_move(mv) {
            Ok(kind) => {
                game.next_turn();
                let line = format!("{player}: {kind} from {} to {}", mv.src, mv.dst);
                println!("{line}");
                trace.line(&line)?;
                return Ok(TurnOutcome::Played);
            }
            Err(_) => println!("The move is not valid! Try again."),
        }
    }
}

/// Poll the broker until the opponent's move for the upcoming turn
/// arrives and resolves. Transport errors are logged and retried.
fn broker_turn(game: &mut Game, broker: &BrokerClient, trace: &mut TraceWriter) -> Result<TurnOutcome> {
    let player = game.next_player();
    tracing::info!("waiting for {player}'s move from the broker");
    loop {
        match broker.fetch_move(game.turns_played() + 1) {
            Ok(Some(mv)) => match game.perform_move(mv) {
                Ok(kind) => {
                    game.next_turn();
                    let line = format!("Broker {player}: {kind} from {} to {}", mv.src, mv.dst);
                    println!("{line}");
                    trace.line(&line)?;
                    return Ok(TurnOutcome::Played);
                }
                Err(err) => tracing::warn!(%err, "broker sent an unplayable move"),
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "broker poll failed"),
        }
        sleep(BROKER_POLL_INTERVAL);
    }
}

/// Run one search and apply its move; publishes to the broker when set
fn computer_turn(
    game: &mut Game,
    searcher: &mut Searcher,
    broker: Option<&BrokerClient>,
    trace: &mut TraceWriter,
) -> Result<TurnOutcome> {
    let player = game.next_player();
    let Some(suggestion) = searcher.suggest_move(game) else {
        return Ok(TurnOutcome::Timeout);
    };

    let kind = game
        .perform_move(suggestion.mv)
        .map_err(|err| anyhow!("search suggested an unplayable move: {err}"))?;
    game.next_turn();

    let line = format!("Computer {player}: {kind} from {} to {}", suggestion.mv.src, suggestion.mv.dst);
    println!("{line}");
    tracing::info!(
        score = suggestion.score,
        elapsed = %format!("{:.3}s", suggestion.elapsed.as_secs_f64()),
        "search complete"
    );

    let stats = searcher.stats();
    trace.line(&line)?;
    trace.line(&format!("Time for this action: {:.3}s", suggestion.elapsed.as_secs_f64()))?;
    trace.line(&format!("Heuristic score: {}", suggestion.score))?;
    trace.line(&format!("Cumulative evals: {}", stats.cumulative_evals()))?;
    trace.line(&format!("Cumulative evals by depth: {}", stats.evals_by_depth()))?;
    trace.line(&format!("Cumulative % evals by depth: {}", stats.percent_evals_by_depth()))?;
    trace.line(&format!("Eval perf.: {:.1}k/s", stats.evals_per_second() / 1000.0))?;
    trace.line(&format!("Average branching factor: {:.2}", stats.average_branching_factor()))?;

    if let Some(broker) = broker {
        if let Err(err) = broker.publish_move(suggestion.mv, game.turns_played()) {
            tracing::warn!(%err, "failed to publish move to broker");
        }
    }
    Ok(TurnOutcome::Played)
}
