//! Fixed-size 2D grid of optional occupants.

use crate::organism::Occupant;
use ecogrid_core::{Census, Error, Kind, Position, Result};
use serde::{Deserialize, Serialize};

/// What an adjacency search is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Empty,
    Occupied(Kind),
}

/// A bounded (non-wrapping) grid stored row-major in a flat vector
///
/// Each slot is the only place its occupant lives; moving an occupant takes
/// it out of one slot and puts it into another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Occupant>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must have at least one row and one column, got {rows}x{cols}"
            )));
        }

        let len = rows.checked_mul(cols).ok_or_else(|| {
            Error::InvalidConfig(format!("grid of {rows}x{cols} cells is too large"))
        })?;

        Ok(Self {
            rows,
            cols,
            cells: vec![None; len],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Occupant> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Occupant> {
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    pub fn kind_at(&self, index: usize) -> Option<Kind> {
        self.get(index).map(Occupant::kind)
    }

    pub fn is_vacant(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(None))
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::from_index(index, self.cols)
    }

    /// Put an occupant into an empty cell
    pub fn place(&mut self, index: usize, occupant: Occupant) -> Result<()> {
        let slot = self.slot_mut(index)?;
        if slot.is_some() {
            return Err(Error::CellOccupied { index });
        }
        *slot = Some(occupant);
        Ok(())
    }

    /// Remove and return whatever occupies the cell
    pub fn take(&mut self, index: usize) -> Option<Occupant> {
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Transfer the occupant at `from` into the empty cell `to`
    pub fn relocate(&mut self, from: usize, to: usize) -> Result<()> {
        if from == to {
            return Ok(());
        }
        if self.slot_mut(to)?.is_some() {
            return Err(Error::CellOccupied { index: to });
        }

        let occupant = self.take(from).ok_or(Error::CellEmpty { index: from })?;
        self.place(to, occupant)
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<Occupant>> {
        let (rows, cols) = (self.rows, self.cols);
        self.cells
            .get_mut(index)
            .ok_or(Error::OutOfBounds { index, rows, cols })
    }

    fn matches(&self, index: usize, target: Target) -> bool {
        match target {
            Target::Empty => self.is_vacant(index),
            Target::Occupied(kind) => self.kind_at(index) == Some(kind),
        }
    }

    /// Orthogonal neighbours of `index` matching `target`, in the order
    /// up, right, down, left. Neighbours across an edge are skipped.
    pub fn find_adjacent(&self, index: usize, target: Target) -> Vec<usize> {
        let cols = self.cols;
        let len = self.cells.len();

        let up = index.checked_sub(cols);
        let right = (index + 1 < len && (index + 1) % cols != 0).then_some(index + 1);
        let down = (index + cols < len).then_some(index + cols);
        let left = (index % cols != 0).then(|| index - 1);

        [up, right, down, left]
            .into_iter()
            .flatten()
            .filter(|&neighbor| self.matches(neighbor, target))
            .collect()
    }

    /// Indices of the first `limit` cells holding `kind`, in increasing order
    pub fn positions_of(&self, kind: Kind, limit: usize) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_ref().is_some_and(|o| o.kind() == kind))
            .map(|(index, _)| index)
            .take(limit)
            .collect()
    }

    /// Count occupants by scanning every cell
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for occupant in self.cells.iter().flatten() {
            match occupant.kind() {
                Kind::Predator => census.predators += 1,
                Kind::Prey => census.prey += 1,
            }
        }
        census
    }

    /// Iterator over all cells with their linear index
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&Occupant>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (index, cell.as_ref()))
    }

    /// Iterator over occupied cells only
    pub fn occupants(&self) -> impl Iterator<Item = (usize, &Occupant)> + '_ {
        self.iter()
            .filter_map(|(index, cell)| cell.map(|occupant| (index, occupant)))
    }
}
