//! Error types for the simulation.

use crate::Kind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Requested population of {requested} exceeds the {cells} available cells")]
    Overpopulated { requested: usize, cells: usize },

    #[error("Empty interval: [{low}, {high}]")]
    EmptyInterval { low: usize, high: usize },

    #[error("Cell {index} is outside a {rows}x{cols} grid")]
    OutOfBounds {
        index: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Cell {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("Cell {index} is empty")]
    CellEmpty { index: usize },

    #[error("Expected a {expected} at cell {index}, found {found}")]
    UnexpectedOccupant {
        index: usize,
        expected: Kind,
        found: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Orchestration bugs: states a correct tick can never produce
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds { .. }
                | Error::CellOccupied { .. }
                | Error::CellEmpty { .. }
                | Error::UnexpectedOccupant { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
