//! Configuration types for the simulation.

use crate::{Error, Kind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Predators placed at construction
    pub initial_predators: usize,
    /// Prey placed at construction
    pub initial_prey: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            initial_predators: 5,
            initial_prey: 100,
        }
    }
}

impl WorldConfig {
    pub fn cells(&self) -> Result<usize> {
        self.rows.checked_mul(self.cols).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "grid of {}x{} cells is too large",
                self.rows, self.cols
            ))
        })
    }

    /// Total organisms placed at construction; a sum that overflows can never fit
    pub fn initial_population(&self) -> Result<usize> {
        let cells = self.cells()?;
        self.initial_predators
            .checked_add(self.initial_prey)
            .ok_or(Error::Overpopulated {
                requested: usize::MAX,
                cells,
            })
    }

    /// Reject grids with no cells and populations that cannot be placed
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must have at least one row and one column, got {}x{}",
                self.rows, self.cols
            )));
        }

        let cells = self.cells()?;
        let requested = self.initial_population()?;
        if requested > cells {
            return Err(Error::Overpopulated { requested, cells });
        }

        Ok(())
    }
}

/// Breeding and starvation thresholds, counted in ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganismConfig {
    /// Ticks a predator must survive before it tries to breed
    pub predator_breed_threshold: u32,
    /// Ticks a prey must survive before it tries to breed
    pub prey_breed_threshold: u32,
    /// Consecutive hungry ticks after which a predator dies
    pub predator_starve_threshold: u32,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            predator_breed_threshold: 8,
            prey_breed_threshold: 3,
            predator_starve_threshold: 3,
        }
    }
}

impl OrganismConfig {
    pub fn breed_threshold(&self, kind: Kind) -> u32 {
        match kind {
            Kind::Predator => self.predator_breed_threshold,
            Kind::Prey => self.prey_breed_threshold,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("predator_breed_threshold", self.predator_breed_threshold),
            ("prey_breed_threshold", self.prey_breed_threshold),
            ("predator_starve_threshold", self.predator_starve_threshold),
        ];

        for (name, value) in thresholds {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be at least 1")));
            }
        }

        Ok(())
    }
}

/// Top-level run configuration read by the entry point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Random seed for reproducibility; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Stop after this many ticks; unbounded when absent
    pub max_ticks: Option<u64>,
    /// World configuration
    pub world: WorldConfig,
    /// Organism thresholds
    pub organisms: OrganismConfig,
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.organisms.validate()
    }
}
