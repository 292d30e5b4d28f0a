//! Unit and player definitions, damage and repair tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum (and starting) unit health
pub const MAX_HEALTH: u8 = 9;

/// Number of unit types (table dimension)
pub const UNIT_TYPE_COUNT: usize = 5;

// ============================================================================
// PLAYER
// ============================================================================

/// The two players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Attacker,
    Defender,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Attacker => Player::Defender,
            Player::Defender => Player::Attacker,
        }
    }

    /// Lowercase initial used in cell rendering
    pub fn initial(self) -> char {
        match self {
            Player::Attacker => 'a',
            Player::Defender => 'd',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Attacker => write!(f, "Attacker"),
            Player::Defender => write!(f, "Defender"),
        }
    }
}

// ============================================================================
// UNIT TYPES
// ============================================================================

/// Every unit type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Ai = 0,
    Tech = 1,
    Virus = 2,
    Program = 3,
    Firewall = 4,
}

impl UnitType {
    /// Uppercase initial used in cell rendering
    pub fn initial(self) -> char {
        match self {
            UnitType::Ai => 'A',
            UnitType::Tech => 'T',
            UnitType::Virus => 'V',
            UnitType::Program => 'P',
            UnitType::Firewall => 'F',
        }
    }

    /// AI, Firewall and Program cannot retreat and are locked in place
    /// while engaged in combat; Tech and Virus are exempt.
    pub fn is_restricted(self) -> bool {
        matches!(self, UnitType::Ai | UnitType::Firewall | UnitType::Program)
    }
}

/// Damage dealt per attack, indexed by [attacker type][target type]
pub static DAMAGE_TABLE: [[u8; UNIT_TYPE_COUNT]; UNIT_TYPE_COUNT] = [
    [3, 3, 3, 3, 1], // AI
    [1, 1, 6, 1, 1], // Tech
    [9, 6, 1, 6, 1], // Virus
    [3, 3, 3, 3, 1], // Program
    [1, 1, 1, 1, 1], // Firewall
];

/// Health restored per repair, indexed by [repairer type][target type]
pub static REPAIR_TABLE: [[u8; UNIT_TYPE_COUNT]; UNIT_TYPE_COUNT] = [
    [0, 1, 1, 0, 0], // AI
    [3, 0, 0, 3, 3], // Tech
    [0, 0, 0, 0, 0], // Virus
    [0, 0, 0, 0, 0], // Program
    [0, 0, 0, 0, 0], // Firewall
];

// ============================================================================
// UNIT
// ============================================================================

/// A single piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub player: Player,
    pub unit_type: UnitType,
    pub health: u8,
}

impl Unit {
    pub fn new(player: Player, unit_type: UnitType) -> Self {
        Self { player, unit_type, health: MAX_HEALTH }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Add a (possibly negative) health delta, clamped to [0, MAX_HEALTH].
    ///
    /// No death event is raised; the caller checks `is_alive` afterward.
    pub fn mod_health(&mut self, delta: i8) {
        self.health = (self.health as i8 + delta).clamp(0, MAX_HEALTH as i8) as u8;
    }

    /// Damage this unit would deal to `target`, capped so it never
    /// reports more than would kill.
    pub fn damage_amount(&self, target: &Unit) -> u8 {
        let amount = DAMAGE_TABLE[self.unit_type as usize][target.unit_type as usize];
        amount.min(target.health)
    }

    /// Health this unit would restore to `target`, capped so the target
    /// never exceeds MAX_HEALTH.
    pub fn repair_amount(&self, target: &Unit) -> u8 {
        let amount = REPAIR_TABLE[self.unit_type as usize][target.unit_type as usize];
        amount.min(MAX_HEALTH - target.health)
    }
}

impl fmt::Display for Unit {
    /// Cell rendering: player initial, type initial, health (e.g. `aV9`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.player.initial(), self.unit_type.initial(), self.health)
    }
}

// ============================================================================
// TESTS
// ============================================================================
