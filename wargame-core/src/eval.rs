//! Position evaluation
//!
//! Three interchangeable, stateless scoring functions over a game
//! state. Each returns `perspective side - opponent side`; higher is
//! better for the perspective player. The search engine is agnostic to
//! which one is configured.

use crate::game::Game;
use crate::units::{Player, UnitType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Heuristic score bounds (stand in for won/lost positions)
pub const MAX_SCORE: i32 = 2_000_000_000;
pub const MIN_SCORE: i32 = -2_000_000_000;

/// Weight of an AI unit in every evaluator
const AI_WEIGHT: i32 = 9999;

/// Penalty per engaged AI in e1
const ENGAGED_AI_PENALTY: i32 = 100;

/// Weight of the mobile unit types (Virus, Tech) in e2
const MOBILE_WEIGHT: i32 = 1000;

// ============================================================================
// SELECTOR
// ============================================================================

/// Selectable evaluator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Material only
    #[default]
    E0,
    /// Material plus AI safety
    E1,
    /// Material plus mobility
    E2,
}

impl Heuristic {
    pub fn evaluate(self, game: &Game, perspective: Player) -> i32 {
        match self {
            Heuristic::E0 => e0(game, perspective),
            Heuristic::E1 => e1(game, perspective),
            Heuristic::E2 => e2(game, perspective),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::E0 => write!(f, "e0"),
            Heuristic::E1 => write!(f, "e1"),
            Heuristic::E2 => write!(f, "e2"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown heuristic '{0}' (expected e0, e1 or e2)")]
pub struct ParseHeuristicError(String);

impl FromStr for Heuristic {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "e0" | "E0" => Ok(Heuristic::E0),
            "e1" | "E1" => Ok(Heuristic::E1),
            "e2" | "E2" => Ok(Heuristic::E2),
            other => Err(ParseHeuristicError(other.to_string())),
        }
    }
}

// ============================================================================
// EVALUATORS
// ============================================================================

/// e0: weighted material count
pub fn e0(game: &Game, perspective: Player) -> i32 {
    side_material(game, perspective) - side_material(game, perspective.opponent())
}

fn side_material(game: &Game, player: Player) -> i32 {
    let mut ai = 0;
    let mut others = 0;
    for (_, unit) in game.player_units(player) {
        if unit.unit_type == UnitType::Ai {
            ai += 1;
        } else {
            others += 1;
        }
    }
    3 * others + AI_WEIGHT * ai
}

/// e1: unit count plus a penalty for every turn the AI is under threat
pub fn e1(game: &Game, perspective: Player) -> i32 {
    side_safety(game, perspective) - side_safety(game, perspective.opponent())
}

fn side_safety(game: &Game, player: Player) -> i32 {
    let mut score = 0;
    let mut ai = 0;
    let mut units = 0;
    for (coord, unit) in game.player_units(player) {
        units += 1;
        if unit.unit_type == UnitType::Ai {
            ai += 1;
            if game.is_engaged_in_combat(coord) {
                score -= ENGAGED_AI_PENALTY;
            }
        }
    }
    score + units + AI_WEIGHT * ai
}

/// e2: favors the high-mobility types (Virus, Tech) and adds the
/// legal-move count difference between the two sides
pub fn e2(game: &Game, perspective: Player) -> i32 {
    let opponent = perspective.opponent();
    let material = side_mobile_material(game, perspective) - side_mobile_material(game, opponent);
    let my_moves = game.move_candidates(perspective).len() as i32;
    let opp_moves = game.move_candidates(opponent).len() as i32;
    material + (my_moves - opp_moves)
}

fn side_mobile_material(game: &Game, player: Player) -> i32 {
    let mut score = 0;
    for (_, unit) in game.player_units(player) {
        score += match unit.unit_type {
            UnitType::Ai => AI_WEIGHT,
            UnitType::Virus | UnitType::Tech => MOBILE_WEIGHT,
            _ => 0,
        };
    }
    score
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, CoordPair};
    use crate::options::Options;

    fn game() -> Game {
        Game::new(Options { randomize_moves: false, ..Options::default() })
    }

    #[test]
    fn test_initial_position_is_balanced() {
        // the starting camps mirror each other for all three evaluators
        let g = game();
        for h in [Heuristic::E0, Heuristic::E1, Heuristic::E2] {
            assert_eq!(h.evaluate(&g, Player::Attacker), 0, "{h} not balanced");
            assert_eq!(h.evaluate(&g, Player::Defender), 0, "{h} not balanced");
        }
    }

    #[test]
    fn test_e0_counts_material() {
        let mut g = game();
        // blow up the attacker Virus at D4: removes it and damages camp mates
        g.perform_move(CoordPair::from_quad(3, 4, 3, 4)).unwrap();
        // attacker is down one 3-point unit; health damage is invisible to e0
        assert_eq!(e0(&g, Player::Attacker), -3);
        assert_eq!(e0(&g, Player::Defender), 3);
    }

    #[test]
    fn test_e0_ai_dominates() {
        let mut g = game();
        // losing the AI outweighs any amount of other material
        g.set(Coord::new(0, 0), None);
        assert!(e0(&g, Player::Attacker) > AI_WEIGHT / 2);
    }

    #[test]
    fn test_e1_penalizes_engaged_ai() {
        let mut g = game();
        // replace the defender Tech next to the AI with an attacker Virus
        g.set(
            Coord::new(1, 0),
            Some(crate::units::Unit::new(Player::Attacker, UnitType::Virus)),
        );
        // defender: engaged AI (-100) and down a unit while the attacker
        // gained one (-2)
        assert_eq!(e1(&g, Player::Defender), -ENGAGED_AI_PENALTY - 2);
    }

    #[test]
    fn test_e2_counts_mobility() {
        let mut g = game();
        // remove both attacker Viruses: mobile material drops by 2000 and
        // the attacker also loses their candidate moves
        g.set(Coord::new(3, 4), None);
        g.set(Coord::new(4, 3), None);
        let score = e2(&g, Player::Attacker);
        assert!(score < -2 * MOBILE_WEIGHT + 20);
        assert!(score > -2 * MOBILE_WEIGHT - 20);
    }

    #[test]
    fn test_heuristic_parsing() {
        assert_eq!("e0".parse::<Heuristic>(), Ok(Heuristic::E0));
        assert_eq!("E2".parse::<Heuristic>(), Ok(Heuristic::E2));
        assert!("e3".parse::<Heuristic>().is_err());
        assert_eq!(Heuristic::E1.to_string(), "e1");
    }
}
