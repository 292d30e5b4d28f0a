//! Game state, legality predicates, action resolution and move generation

use crate::board::{Coord, CoordPair};
use crate::options::Options;
use crate::units::{Player, Unit, UnitType, MAX_HEALTH};
use std::fmt;
use thiserror::Error;

/// Splash damage dealt to every cell around a self-destructing unit
const SELF_DESTRUCT_SPLASH: i8 = 2;

// ============================================================================
// ACTION OUTCOME
// ============================================================================

/// Which of the four action kinds a `perform_move` call resolved to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Move,
    Attack,
    Repair,
    SelfDestruct,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Move => write!(f, "move"),
            ActionKind::Attack => write!(f, "attack"),
            ActionKind::Repair => write!(f, "repair"),
            ActionKind::SelfDestruct => write!(f, "self-destruct"),
        }
    }
}

/// An action that resolved to none of the four kinds; the board is untouched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid move {0}")]
pub struct InvalidMove(pub CoordPair);

// ============================================================================
// GAME STATE
// ============================================================================

/// Full game state (clone once per explored search node).
///
/// The grid is a dense row-major array of optional units; the two
/// AI-alive flags are maintained incrementally on unit removal rather
/// than recomputed by scanning.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Vec<Option<Unit>>,
    dim: i8,
    next_player: Player,
    turns_played: u32,
    attacker_has_ai: bool,
    defender_has_ai: bool,
    pub options: Options,
}

impl Game {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Create a new game with the standard initial layout: two symmetric
    /// camps in opposite corners, Defender top-left, Attacker bottom-right.
    pub fn new(options: Options) -> Self {
        let dim = options.dim;
        let mut game = Self {
            grid: vec![None; (dim as usize) * (dim as usize)],
            dim,
            next_player: Player::Attacker,
            turns_played: 0,
            attacker_has_ai: true,
            defender_has_ai: true,
            options,
        };

        let md = dim - 1;
        let defender = [
            (Coord::new(0, 0), UnitType::Ai),
            (Coord::new(1, 0), UnitType::Tech),
            (Coord::new(0, 1), UnitType::Tech),
            (Coord::new(2, 0), UnitType::Firewall),
            (Coord::new(0, 2), UnitType::Firewall),
            (Coord::new(1, 1), UnitType::Program),
        ];
        let attacker = [
            (Coord::new(md, md), UnitType::Ai),
            (Coord::new(md - 1, md), UnitType::Virus),
            (Coord::new(md, md - 1), UnitType::Virus),
            (Coord::new(md - 2, md), UnitType::Program),
            (Coord::new(md, md - 2), UnitType::Program),
            (Coord::new(md - 1, md - 1), UnitType::Firewall),
        ];
        for (coord, unit_type) in defender {
            game.set(coord, Some(Unit::new(Player::Defender, unit_type)));
        }
        for (coord, unit_type) in attacker {
            game.set(coord, Some(Unit::new(Player::Attacker, unit_type)));
        }
        game
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn dim(&self) -> i8 {
        self.dim
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn is_valid_coord(&self, coord: Coord) -> bool {
        coord.row >= 0 && coord.row < self.dim && coord.col >= 0 && coord.col < self.dim
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row as usize * self.dim as usize + coord.col as usize
    }

    /// Cell contents; out-of-bounds coordinates read as empty
    pub fn get(&self, coord: Coord) -> Option<&Unit> {
        if self.is_valid_coord(coord) {
            self.grid[self.index(coord)].as_ref()
        } else {
            None
        }
    }

    /// Set cell contents; out-of-bounds coordinates are a no-op
    pub fn set(&mut self, coord: Coord, unit: Option<Unit>) {
        if self.is_valid_coord(coord) {
            let idx = self.index(coord);
            self.grid[idx] = unit;
        }
    }

    /// All units belonging to `player`, with their coordinates
    pub fn player_units(&self, player: Player) -> impl Iterator<Item = (Coord, Unit)> + '_ {
        let dim = self.dim as usize;
        self.grid.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .filter(|unit| unit.player == player)
                .map(|unit| (Coord::new((i / dim) as i8, (i % dim) as i8), *unit))
        })
    }

    // ========================================================================
    // LEGALITY PREDICATES
    // ========================================================================

    /// True if any orthogonal neighbor of `coord` holds an enemy unit
    pub fn is_engaged_in_combat(&self, coord: Coord) -> bool {
        let Some(unit) = self.get(coord) else { return false };
        coord
            .adjacent()
            .iter()
            .any(|&adj| self.get(adj).is_some_and(|n| n.player != unit.player))
    }

    pub fn is_adjacent(&self, a: Coord, b: Coord) -> bool {
        a.is_adjacent(b)
    }

    /// Plain relocation legality for the player to move
    pub fn is_valid_move(&self, mv: CoordPair) -> bool {
        self.can_move(self.next_player, mv)
    }

    pub fn is_valid_to_attack(&self, mv: CoordPair) -> bool {
        self.can_attack(self.next_player, mv)
    }

    pub fn is_valid_to_repair(&self, mv: CoordPair) -> bool {
        self.can_repair(self.next_player, mv)
    }

    pub fn is_valid_to_self_destruct(&self, mv: CoordPair) -> bool {
        self.can_self_destruct(self.next_player, mv)
    }

    fn can_move(&self, player: Player, mv: CoordPair) -> bool {
        if !self.is_valid_coord(mv.src) || !self.is_valid_coord(mv.dst) {
            return false;
        }
        let unit = match self.get(mv.src) {
            Some(u) if u.player == player => *u,
            _ => return false,
        };
        if !mv.src.is_adjacent(mv.dst) {
            return false;
        }
        if unit.unit_type.is_restricted() {
            // combat locks these types in place
            if self.is_engaged_in_combat(mv.src) {
                return false;
            }
            let down = mv.dst.row == mv.src.row + 1;
            let right = mv.dst.col == mv.src.col + 1;
            let up = mv.dst.row == mv.src.row - 1;
            let left = mv.dst.col == mv.src.col - 1;
            match player {
                Player::Attacker if down || right => return false,
                Player::Defender if up || left => return false,
                _ => {}
            }
        }
        self.get(mv.dst).is_none()
    }

    fn can_attack(&self, player: Player, mv: CoordPair) -> bool {
        let (Some(src), Some(dst)) = (self.get(mv.src), self.get(mv.dst)) else {
            return false;
        };
        mv.src.is_adjacent(mv.dst) && src.player == player && dst.player != player
    }

    fn can_repair(&self, player: Player, mv: CoordPair) -> bool {
        let (Some(src), Some(dst)) = (self.get(mv.src), self.get(mv.dst)) else {
            return false;
        };
        mv.src.is_adjacent(mv.dst)
            && src.player == player
            && dst.player == player
            && src.repair_amount(dst) != 0
            && dst.health < MAX_HEALTH
    }

    fn can_self_destruct(&self, player: Player, mv: CoordPair) -> bool {
        matches!(self.get(mv.src), Some(u) if u.player == player) && mv.is_in_place()
    }

    // ========================================================================
    // ACTION RESOLUTION
    // ========================================================================

    /// Resolve the first applicable action for `mv`, in fixed priority
    /// order: plain move, attack, repair, self-destruct. Exactly one
    /// action kind executes per call; an inapplicable pair leaves the
    /// board untouched and reports `InvalidMove`.
    pub fn perform_move(&mut self, mv: CoordPair) -> Result<ActionKind, InvalidMove> {
        if self.is_valid_move(mv) {
            let unit = self.get(mv.src).copied();
            self.set(mv.dst, unit);
            self.set(mv.src, None);
            return Ok(ActionKind::Move);
        }
        if self.is_valid_to_attack(mv) {
            self.attack(mv);
            return Ok(ActionKind::Attack);
        }
        if self.is_valid_to_repair(mv) {
            self.repair(mv);
            return Ok(ActionKind::Repair);
        }
        if self.is_valid_to_self_destruct(mv) {
            self.self_destruct(mv);
            return Ok(ActionKind::SelfDestruct);
        }
        Err(InvalidMove(mv))
    }

    /// Hand the turn to the other player
    pub fn next_turn(&mut self) {
        self.next_player = self.next_player.opponent();
        self.turns_played += 1;
    }

    /// Mutual damage, both amounts computed from pre-attack health and
    /// applied sequentially (source delta first, then destination).
    fn attack(&mut self, mv: CoordPair) {
        let (Some(src), Some(dst)) = (self.get(mv.src).copied(), self.get(mv.dst).copied()) else {
            return;
        };
        let to_dst = src.damage_amount(&dst);
        let to_src = dst.damage_amount(&src);
        self.mod_health(mv.src, -(to_src as i8));
        self.mod_health(mv.dst, -(to_dst as i8));
    }

    /// Only the target's health changes; the repairer is unaffected
    fn repair(&mut self, mv: CoordPair) {
        let (Some(src), Some(dst)) = (self.get(mv.src).copied(), self.get(mv.dst).copied()) else {
            return;
        };
        let amount = src.repair_amount(&dst);
        self.mod_health(mv.dst, amount as i8);
    }

    /// The acting unit dies; every cell in the 3x3 block around it takes
    /// splash damage. The block includes the source, but the unit there
    /// is already dead so the extra hit has no effect.
    fn self_destruct(&mut self, mv: CoordPair) {
        let Some(unit) = self.get(mv.src).copied() else { return };
        self.mod_health(mv.src, -(unit.health as i8));
        for coord in mv.src.surrounding() {
            self.mod_health(coord, -SELF_DESTRUCT_SPLASH);
        }
    }

    /// Apply a health delta to the unit at `coord` (if any) and remove
    /// it when dead, keeping the AI-alive flags consistent.
    fn mod_health(&mut self, coord: Coord, delta: i8) {
        if !self.is_valid_coord(coord) {
            return;
        }
        let idx = self.index(coord);
        let Some(unit) = self.grid[idx].as_mut() else { return };
        unit.mod_health(delta);
        if unit.is_alive() {
            return;
        }
        let dead = *unit;
        self.grid[idx] = None;
        if dead.unit_type == UnitType::Ai {
            match dead.player {
                Player::Attacker => self.attacker_has_ai = false,
                Player::Defender => self.defender_has_ai = false,
            }
        }
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Enumerate action candidates for `player`: every adjacent pair
    /// passing move, attack or repair legality, plus the self-destruct
    /// pair for every owned unit. Self-destruct legality is deliberately
    /// not filtered here; it is rechecked at resolution time.
    pub fn move_candidates(&self, player: Player) -> Vec<CoordPair> {
        let mut moves = Vec::new();
        for (src, _) in self.player_units(player) {
            for dst in src.adjacent() {
                let mv = CoordPair::new(src, dst);
                if self.can_move(player, mv)
                    || self.can_attack(player, mv)
                    || self.can_repair(player, mv)
                {
                    moves.push(mv);
                }
            }
            moves.push(CoordPair::new(src, src));
        }
        moves
    }

    // ========================================================================
    // WINNER
    // ========================================================================

    /// Winner, if the game is over. Reaching the turn limit hands the
    /// win to the Defender (attrition rule); otherwise a player wins
    /// when only the opponent's AI is dead.
    pub fn has_winner(&self) -> Option<Player> {
        if self.turns_played >= self.options.max_turns {
            return Some(Player::Defender);
        }
        match (self.attacker_has_ai, self.defender_has_ai) {
            (true, true) => None,
            (true, false) => Some(Player::Attacker),
            (false, _) => Some(Player::Defender),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.has_winner().is_some()
    }

    // ========================================================================
    // DISPLAY
    // ========================================================================

    /// Fixed textual grid rendering with next-player/turn header
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Next player: {}", self.next_player)?;
        writeln!(f, "Turns played: {}", self.turns_played)?;
        write!(f, "\n   ")?;
        for col in 0..self.dim {
            write!(f, "{:^3} ", Coord::new(0, col).col_label())?;
        }
        writeln!(f)?;
        for row in 0..self.dim {
            write!(f, "{}: ", Coord::new(row, 0).row_label())?;
            for col in 0..self.dim {
                match self.get(Coord::new(row, col)) {
                    Some(unit) => write!(f, "{:^3} ", unit.to_string())?,
                    None => write!(f, " .  ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(Options { randomize_moves: false, ..Options::default() })
    }

    /// Clear the board, keeping flags and turn state
    fn empty_game() -> Game {
        let mut g = game();
        for row in 0..5 {
            for col in 0..5 {
                g.set(Coord::new(row, col), None);
            }
        }
        g
    }

    fn put(g: &mut Game, row: i8, col: i8, player: Player, unit_type: UnitType) {
        g.set(Coord::new(row, col), Some(Unit::new(player, unit_type)));
    }

    #[test]
    fn test_initial_layout() {
        let g = game();
        assert_eq!(g.next_player(), Player::Attacker);
        assert_eq!(g.turns_played(), 0);
        assert_eq!(g.player_units(Player::Attacker).count(), 6);
        assert_eq!(g.player_units(Player::Defender).count(), 6);
        let def_ai = g.get(Coord::new(0, 0)).unwrap();
        assert_eq!(def_ai.unit_type, UnitType::Ai);
        assert_eq!(def_ai.player, Player::Defender);
        let att_ai = g.get(Coord::new(4, 4)).unwrap();
        assert_eq!(att_ai.unit_type, UnitType::Ai);
        assert_eq!(att_ai.player, Player::Attacker);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut g = game();
        assert!(g.get(Coord::new(-1, 0)).is_none());
        assert!(g.get(Coord::new(0, 5)).is_none());
        // out-of-bounds set is absorbed
        g.set(Coord::new(7, 7), Some(Unit::new(Player::Attacker, UnitType::Virus)));
        assert_eq!(g.player_units(Player::Attacker).count(), 6);
    }

    #[test]
    fn test_move_into_occupied_cell_is_invalid() {
        let mut g = empty_game();
        put(&mut g, 2, 2, Player::Attacker, UnitType::Ai);
        put(&mut g, 2, 1, Player::Attacker, UnitType::Firewall);
        // AI onto its own Firewall resolves to nothing: not a move
        // (occupied), not an attack (same owner), not a repair (AI cannot
        // repair a Firewall), not a self-destruct (src != dst)
        let mv = CoordPair::from_quad(2, 2, 2, 1);
        assert_eq!(g.perform_move(mv), Err(InvalidMove(mv)));
        assert_eq!(g.get(Coord::new(2, 1)).unwrap().health, 9);
    }

    #[test]
    fn test_attacker_restricted_directions() {
        let mut g = empty_game();
        // restricted attacker unit in the center: only up and left are legal
        put(&mut g, 2, 2, Player::Attacker, UnitType::Program);
        assert!(g.is_valid_move(CoordPair::from_quad(2, 2, 1, 2))); // up
        assert!(g.is_valid_move(CoordPair::from_quad(2, 2, 2, 1))); // left
        assert!(!g.is_valid_move(CoordPair::from_quad(2, 2, 3, 2))); // down
        assert!(!g.is_valid_move(CoordPair::from_quad(2, 2, 2, 3))); // right
    }

    #[test]
    fn test_defender_restricted_directions() {
        let mut g = empty_game();
        g.next_turn(); // Defender to move
        put(&mut g, 2, 2, Player::Defender, UnitType::Firewall);
        assert!(!g.is_valid_move(CoordPair::from_quad(2, 2, 1, 2))); // up
        assert!(!g.is_valid_move(CoordPair::from_quad(2, 2, 2, 1))); // left
        assert!(g.is_valid_move(CoordPair::from_quad(2, 2, 3, 2))); // down
        assert!(g.is_valid_move(CoordPair::from_quad(2, 2, 2, 3))); // right
    }

    #[test]
    fn test_restriction_from_board_corners() {
        let mut g = empty_game();
        // attacker AI in the bottom-right corner can still go up or left
        put(&mut g, 4, 4, Player::Attacker, UnitType::Ai);
        assert!(g.is_valid_move(CoordPair::from_quad(4, 4, 3, 4)));
        assert!(g.is_valid_move(CoordPair::from_quad(4, 4, 4, 3)));
        // attacker AI in the top-left corner has no legal move at all
        let mut g = empty_game();
        put(&mut g, 0, 0, Player::Attacker, UnitType::Ai);
        assert!(!g.is_valid_move(CoordPair::from_quad(0, 0, 0, 1)));
        assert!(!g.is_valid_move(CoordPair::from_quad(0, 0, 1, 0)));
        assert!(!g.is_valid_move(CoordPair::from_quad(0, 0, -1, 0)));
        assert!(!g.is_valid_move(CoordPair::from_quad(0, 0, 0, -1)));
    }

    #[test]
    fn test_engagement_locks_restricted_types() {
        let mut g = empty_game();
        put(&mut g, 2, 2, Player::Attacker, UnitType::Program);
        put(&mut g, 2, 3, Player::Defender, UnitType::Tech);
        assert!(g.is_engaged_in_combat(Coord::new(2, 2)));
        // engaged Program cannot move in any direction, even its allowed ones
        assert!(!g.is_valid_move(CoordPair::from_quad(2, 2, 1, 2)));
        assert!(!g.is_valid_move(CoordPair::from_quad(2, 2, 2, 1)));
    }

    #[test]
    fn test_engagement_exempts_tech_and_virus() {
        let mut g = empty_game();
        put(&mut g, 2, 2, Player::Attacker, UnitType::Virus);
        put(&mut g, 2, 3, Player::Defender, UnitType::Tech);
        assert!(g.is_engaged_in_combat(Coord::new(2, 2)));
        assert!(g.is_valid_move(CoordPair::from_quad(2, 2, 1, 2)));
        // Virus may also retreat down despite being the Attacker's
        assert!(g.is_valid_move(CoordPair::from_quad(2, 2, 3, 2)));
    }

    #[test]
    fn test_engagement_on_empty_cell() {
        let g = empty_game();
        assert!(!g.is_engaged_in_combat(Coord::new(2, 2)));
    }

    #[test]
    fn test_attack_is_mutual() {
        let mut g = empty_game();
        put(&mut g, 2, 2, Player::Attacker, UnitType::Virus);
        put(&mut g, 2, 3, Player::Defender, UnitType::Tech);
        let result = g.perform_move(CoordPair::from_quad(2, 2, 2, 3));
        assert_eq!(result, Ok(ActionKind::Attack));
        // Virus deals 6 to Tech, Tech deals 6 back
        assert_eq!(g.get(Coord::new(2, 2)).unwrap().health, 3);
        assert_eq!(g.get(Coord::new(2, 3)).unwrap().health, 3);
    }

    #[test]
    fn test_attack_kill_removes_unit() {
        let mut g = empty_game();
        put(&mut g, 2, 2, Player::Attacker, UnitType::Virus);
        put(&mut g, 2, 3, Player::Defender, UnitType::Ai);
        let result = g.perform_move(CoordPair::from_quad(2, 2, 2, 3));
        assert_eq!(result, Ok(ActionKind::Attack));
        // Virus kills the AI outright (9 damage) and takes 3 back
        assert!(g.get(Coord::new(2, 3)).is_none());
        assert_eq!(g.get(Coord::new(2, 2)).unwrap().health, 6);
        assert_eq!(g.has_winner(), Some(Player::Attacker));
    }

    #[test]
    fn test_repair_only_heals_target() {
        let mut g = empty_game();
        g.next_turn();
        put(&mut g, 1, 1, Player::Defender, UnitType::Tech);
        let mut firewall = Unit::new(Player::Defender, UnitType::Firewall);
        firewall.health = 4;
        g.set(Coord::new(1, 2), Some(firewall));
        let result = g.perform_move(CoordPair::from_quad(1, 1, 1, 2));
        assert_eq!(result, Ok(ActionKind::Repair));
        assert_eq!(g.get(Coord::new(1, 2)).unwrap().health, 7);
        assert_eq!(g.get(Coord::new(1, 1)).unwrap().health, 9);
    }

    #[test]
    fn test_repair_rejected_when_full_or_incapable() {
        let mut g = empty_game();
        g.next_turn();
        put(&mut g, 1, 1, Player::Defender, UnitType::Tech);
        put(&mut g, 1, 2, Player::Defender, UnitType::Firewall);
        // full-health target
        assert!(!g.is_valid_to_repair(CoordPair::from_quad(1, 1, 1, 2)));
        // zero-entry repairer (Firewall repairs nothing)
        let mut hurt = Unit::new(Player::Defender, UnitType::Tech);
        hurt.health = 3;
        g.set(Coord::new(1, 1), Some(hurt));
        assert!(!g.is_valid_to_repair(CoordPair::from_quad(1, 2, 1, 1)));
    }

    #[test]
    fn test_self_destruct_splash() {
        let mut g = empty_game();
        put(&mut g, 2, 2, Player::Attacker, UnitType::Program);
        put(&mut g, 1, 1, Player::Defender, UnitType::Tech); // diagonal neighbor
        put(&mut g, 2, 3, Player::Attacker, UnitType::Virus); // own unit is hit too
        put(&mut g, 0, 0, Player::Defender, UnitType::Firewall); // outside the blast
        let result = g.perform_move(CoordPair::from_quad(2, 2, 2, 2));
        assert_eq!(result, Ok(ActionKind::SelfDestruct));
        assert!(g.get(Coord::new(2, 2)).is_none());
        assert_eq!(g.get(Coord::new(1, 1)).unwrap().health, 7);
        assert_eq!(g.get(Coord::new(2, 3)).unwrap().health, 7);
        assert_eq!(g.get(Coord::new(0, 0)).unwrap().health, 9);
    }

    #[test]
    fn test_self_destruct_from_initial_corner() {
        let mut g = game();
        // Attacker Virus at D4 blows up next to its own camp
        let result = g.perform_move(CoordPair::from_quad(3, 4, 3, 4));
        assert_eq!(result, Ok(ActionKind::SelfDestruct));
        assert!(g.get(Coord::new(3, 4)).is_none());
        // every unit in the 3x3 block takes exactly 2
        assert_eq!(g.get(Coord::new(4, 4)).unwrap().health, 7); // AI
        assert_eq!(g.get(Coord::new(3, 3)).unwrap().health, 7); // Firewall
        assert_eq!(g.get(Coord::new(2, 4)).unwrap().health, 7); // Program
        assert_eq!(g.get(Coord::new(4, 3)).unwrap().health, 7); // other Virus
        // the rest of the camp is untouched
        assert_eq!(g.get(Coord::new(4, 2)).unwrap().health, 9);
    }

    #[test]
    fn test_move_priority_and_turn_counter() {
        let mut g = game();
        // D4 -> D3 is the attacker Virus onto its own Firewall: rejected
        // with no board mutation
        let onto_own = CoordPair::from_quad(3, 4, 3, 3);
        assert_eq!(g.perform_move(onto_own), Err(InvalidMove(onto_own)));
        assert_eq!(g.turns_played(), 0);
        // attacker Program moves up into an empty cell
        let open = CoordPair::from_quad(2, 4, 1, 4);
        assert_eq!(g.perform_move(open), Ok(ActionKind::Move));
        g.next_turn();
        assert_eq!(g.turns_played(), 1);
        assert_eq!(g.next_player(), Player::Defender);
        assert!(g.get(Coord::new(2, 4)).is_none());
        assert!(g.get(Coord::new(1, 4)).is_some());
    }

    #[test]
    fn test_winner_all_combinations() {
        let mut g = game();
        assert_eq!(g.has_winner(), None);
        g.defender_has_ai = false;
        assert_eq!(g.has_winner(), Some(Player::Attacker));
        g.attacker_has_ai = false;
        assert_eq!(g.has_winner(), Some(Player::Defender));
        g.defender_has_ai = true;
        assert_eq!(g.has_winner(), Some(Player::Defender));
        // turn limit beats everything else
        let mut g = game();
        g.turns_played = g.options.max_turns;
        assert_eq!(g.has_winner(), Some(Player::Defender));
        assert!(g.is_finished());
    }

    #[test]
    fn test_move_candidates_include_self_destructs() {
        let g = game();
        let moves = g.move_candidates(Player::Attacker);
        // one unconditional self-destruct per owned unit
        let destructs = moves.iter().filter(|mv| mv.is_in_place()).count();
        assert_eq!(destructs, 6);
        // every non-destruct candidate resolves successfully
        for &mv in moves.iter().filter(|mv| !mv.is_in_place()) {
            let mut probe = g.clone();
            assert!(probe.perform_move(mv).is_ok(), "candidate {mv} failed");
        }
    }

    #[test]
    fn test_move_candidates_for_either_player() {
        let g = game();
        // candidates are generated for the given player regardless of
        // whose turn it is
        let defender_moves = g.move_candidates(Player::Defender);
        assert!(defender_moves.iter().any(|mv| !mv.is_in_place()));
    }

    #[test]
    fn test_display_rendering() {
        let g = game();
        let expected = "Next player: Attacker\n\
                        Turns played: 0\n\
                        \n    0   1   2   3   4  \n\
                        A: dA9 dT9 dF9  .   .  \n\
                        B: dT9 dP9  .   .   .  \n\
                        C: dF9  .   .   .  aP9 \n\
                        D:  .   .   .  aF9 aV9 \n\
                        E:  .   .  aP9 aV9 aA9 \n";
        assert_eq!(g.to_display_string(), expected);
    }
}
