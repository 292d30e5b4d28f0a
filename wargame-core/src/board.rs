//! Board geometry: cell coordinates and move descriptors
//!
//! Pure value types with no game rules. Rows are labeled A-Z, columns
//! use the hex-digit alphabet 0-9a-f, so a cell prints as e.g. `D2`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Row label alphabet (row 0 = 'A')
pub const ROW_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Column label alphabet (col 0 = '0', col 10 = 'a')
pub const COL_LABELS: &str = "0123456789abcdef";

/// Characters ignored when parsing coordinate text
const SEPARATORS: &[char] = &[' ', ',', '.', ':', ';', '-', '_'];

/// Coordinate text that could not be parsed
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseCoordError {
    #[error("expected {expected} coordinate characters, got {got}")]
    Length { expected: usize, got: usize },
    #[error("unrecognized coordinate character '{0}'")]
    BadChar(char),
}

// ============================================================================
// COORD
// ============================================================================

/// A (row, col) cell on the grid, zero-based
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// The 4 orthogonal neighbors (up, left, down, right)
    pub fn adjacent(&self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row + 1, self.col),
            Coord::new(self.row, self.col + 1),
        ]
    }

    /// The 3x3 block centered on this cell, including the cell itself
    pub fn surrounding(&self) -> impl Iterator<Item = Coord> {
        let center = *self;
        (center.row - 1..=center.row + 1)
            .flat_map(move |row| (center.col - 1..=center.col + 1).map(move |col| Coord::new(row, col)))
    }

    /// Manhattan distance exactly 1 (shares a row or column, offset by 1)
    pub fn is_adjacent(&self, other: Coord) -> bool {
        (self.row == other.row && (self.col - other.col).abs() == 1)
            || (self.col == other.col && (self.row - other.row).abs() == 1)
    }

    pub fn row_label(&self) -> char {
        ROW_LABELS.chars().nth(self.row as usize).unwrap_or('?')
    }

    pub fn col_label(&self) -> char {
        COL_LABELS.chars().nth(self.col as usize).unwrap_or('?')
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_label(), self.col_label())
    }
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parse a 2-character token such as `D2`; separator characters are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = strip_separators(s);
        if chars.len() != 2 {
            return Err(ParseCoordError::Length { expected: 2, got: chars.len() });
        }
        Ok(Coord::new(parse_row(chars[0])?, parse_col(chars[1])?))
    }
}

// ============================================================================
// COORD PAIR
// ============================================================================

/// An ordered (source, destination) pair describing a game action.
///
/// The pair carries no intent tag: whether it denotes a move, attack,
/// repair or self-destruct (source == destination) is decided by the
/// board contents at resolution time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordPair {
    pub src: Coord,
    pub dst: Coord,
}

impl CoordPair {
    pub const fn new(src: Coord, dst: Coord) -> Self {
        Self { src, dst }
    }

    pub const fn from_quad(row0: i8, col0: i8, row1: i8, col1: i8) -> Self {
        Self::new(Coord::new(row0, col0), Coord::new(row1, col1))
    }

    /// Source and destination coincide (self-destruct form)
    pub fn is_in_place(&self) -> bool {
        self.src == self.dst
    }
}

impl fmt::Display for CoordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.src, self.dst)
    }
}

impl FromStr for CoordPair {
    type Err = ParseCoordError;

    /// Parse two concatenated coordinate tokens such as `A3 B2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = strip_separators(s);
        if chars.len() != 4 {
            return Err(ParseCoordError::Length { expected: 4, got: chars.len() });
        }
        Ok(CoordPair::new(
            Coord::new(parse_row(chars[0])?, parse_col(chars[1])?),
            Coord::new(parse_row(chars[2])?, parse_col(chars[3])?),
        ))
    }
}

// ============================================================================
// PARSING HELPERS
// ============================================================================

fn strip_separators(s: &str) -> Vec<char> {
    s.chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

fn parse_row(c: char) -> Result<i8, ParseCoordError> {
    ROW_LABELS
        .find(c.to_ascii_uppercase())
        .map(|i| i as i8)
        .ok_or(ParseCoordError::BadChar(c))
}

fn parse_col(c: char) -> Result<i8, ParseCoordError> {
    COL_LABELS
        .find(c.to_ascii_lowercase())
        .map(|i| i as i8)
        .ok_or(ParseCoordError::BadChar(c))
}

// ============================================================================
// TESTS
// ============================================================================
