//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol shown for a cell with no occupant
pub const EMPTY_SYMBOL: char = '-';

/// Unique identifier for an occupant instance
///
/// Identifiers are handed out in creation order and survive moves, so an
/// occupant keeps its id for its whole life on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OccupantId(pub u64);

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two organism kinds living on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Predator,
    Prey,
}

impl Kind {
    /// Display symbol, derived purely from the kind
    pub fn symbol(&self) -> char {
        match self {
            Kind::Predator => 'X',
            Kind::Prey => 'o',
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Predator => f.write_str("predator"),
            Kind::Prey => f.write_str("prey"),
        }
    }
}

/// Symbol for an optional occupant kind
pub fn cell_symbol(kind: Option<Kind>) -> char {
    kind.map_or(EMPTY_SYMBOL, |kind| kind.symbol())
}

/// Row/column coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Coordinate of a linear index in a grid with `cols` columns (row-major)
    pub fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Population counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub predators: usize,
    pub prey: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.predators + self.prey
    }
}
