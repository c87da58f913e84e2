//! Read-only snapshots handed to renderers.

use crate::grid::Grid;
use ecogrid_core::{cell_symbol, Census, Kind, Result};
use serde::{Deserialize, Serialize};

/// The grid as a renderer sees it: dimensions, counts, and the kind in each cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldView {
    pub tick: u64,
    pub rows: usize,
    pub cols: usize,
    pub predators: usize,
    pub prey: usize,
    /// Row-major, `rows * cols` entries
    pub cells: Vec<Option<Kind>>,
}

impl WorldView {
    pub fn capture(grid: &Grid, tick: u64, counts: Census) -> Self {
        Self {
            tick,
            rows: grid.rows(),
            cols: grid.cols(),
            predators: counts.predators,
            prey: counts.prey,
            cells: grid.iter().map(|(_, cell)| cell.map(|o| o.kind())).collect(),
        }
    }

    /// One string per row, each cell symbol followed by a space
    pub fn symbol_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.cols.max(1)).map(|row| {
            row.iter()
                .flat_map(|&kind| [cell_symbol(kind), ' '])
                .collect::<String>()
        })
    }
}

/// Anything that can present the world between ticks
pub trait Renderer {
    fn render(&mut self, view: &WorldView) -> Result<()>;
}
