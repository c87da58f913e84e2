//! Tick orchestration: the predator phase followed by the prey phase.

use crate::behavior::{self, Outcome};
use crate::grid::Grid;
use crate::organism::{Occupant, OccupantIds};
use crate::view::WorldView;
use ecogrid_core::{Census, Kind, OrganismConfig, RandomSelector, Result, WorldConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// What changed during one tick, plus the populations it left behind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub predators_born: usize,
    pub prey_born: usize,
    pub prey_eaten: usize,
    pub predators_starved: usize,
    pub predators: usize,
    pub prey: usize,
}

/// Running totals over many ticks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub ticks: u64,
    pub predators_born: usize,
    pub prey_born: usize,
    pub prey_eaten: usize,
    pub predators_starved: usize,
}

impl RunTotals {
    pub fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.predators_born += report.predators_born;
        self.prey_born += report.prey_born;
        self.prey_eaten += report.prey_eaten;
        self.predators_starved += report.predators_starved;
    }
}

pub struct World {
    grid: Grid,
    selector: RandomSelector,
    ids: OccupantIds,
    predators: usize,
    prey: usize,
    tick: u64,
}

impl World {
    /// Build a world with the configured populations scattered over
    /// distinct random cells.
    pub fn new(
        config: &WorldConfig,
        organisms: OrganismConfig,
        mut selector: RandomSelector,
    ) -> Result<Self> {
        config.validate()?;
        organisms.validate()?;

        let mut grid = Grid::new(config.rows, config.cols)?;
        let mut ids = OccupantIds::default();

        let population = config.initial_population()?;
        let cells = selector.distinct_in_interval(0, grid.len() - 1, population)?;
        for (slot, &index) in cells.iter().enumerate() {
            let kind = if slot < config.initial_predators {
                Kind::Predator
            } else {
                Kind::Prey
            };
            grid.place(index, Occupant::new(ids.next_id(), kind, &organisms))?;
        }

        info!(
            event = "world_created",
            rows = config.rows,
            cols = config.cols,
            predators = config.initial_predators,
            prey = config.initial_prey,
            "World created"
        );

        Ok(Self {
            grid,
            selector,
            ids,
            predators: config.initial_predators,
            prey: config.initial_prey,
            tick: 0,
        })
    }

    /// Wrap an existing layout; counts come from scanning the grid and each
    /// occupant keeps the thresholds it was created with
    pub fn from_grid(grid: Grid, selector: RandomSelector) -> Self {
        let census = grid.census();
        let last_id = grid.occupants().map(|(_, occupant)| occupant.id).max();

        Self {
            grid,
            selector,
            ids: OccupantIds::after(last_id),
            predators: census.predators,
            prey: census.prey,
            tick: 0,
        }
    }

    /// Advance the world by one tick
    #[instrument(level = "debug", skip(self), fields(tick = self.tick + 1))]
    pub fn step(&mut self) -> Result<TickReport> {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..Default::default()
        };

        self.predator_phase(&mut report)?;
        self.prey_phase(&mut report)?;

        report.predators = self.predators;
        report.prey = self.prey;

        debug!(
            event = "tick_complete",
            tick = report.tick,
            predators = report.predators,
            prey = report.prey,
            predators_born = report.predators_born,
            prey_born = report.prey_born,
            prey_eaten = report.prey_eaten,
            predators_starved = report.predators_starved,
            "Tick complete"
        );

        Ok(report)
    }

    fn predator_phase(&mut self, report: &mut TickReport) -> Result<()> {
        // Frozen before any predator acts, so newborns wait for the next tick
        let snapshot = self.grid.positions_of(Kind::Predator, self.predators);

        for index in snapshot {
            let at = match behavior::hunt(&mut self.grid, &mut self.selector, index)? {
                Outcome::Starved { at } => {
                    self.grid.take(at);
                    self.predators -= 1;
                    report.predators_starved += 1;
                    continue;
                }
                Outcome::Ate { to, .. } => {
                    self.prey -= 1;
                    report.prey_eaten += 1;
                    to
                }
                Outcome::Moved { to, .. } => to,
                Outcome::Stayed { at } => at,
            };

            // Only survivors breed, from wherever they ended up
            if behavior::breed_control(&mut self.grid, &mut self.selector, &mut self.ids, at)?
                .is_some()
            {
                self.predators += 1;
                report.predators_born += 1;
            }
        }

        Ok(())
    }

    fn prey_phase(&mut self, report: &mut TickReport) -> Result<()> {
        let snapshot = self.grid.positions_of(Kind::Prey, self.prey);

        for index in snapshot {
            behavior::expect_kind(&self.grid, index, Kind::Prey)?;

            let outcome = behavior::wander(&mut self.grid, &mut self.selector, index)?;
            if let Some(at) = outcome.position() {
                if behavior::breed_control(&mut self.grid, &mut self.selector, &mut self.ids, at)?
                    .is_some()
                {
                    self.prey += 1;
                    report.prey_born += 1;
                }
            }
        }

        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn predators(&self) -> usize {
        self.predators
    }

    pub fn prey(&self) -> usize {
        self.prey
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Counts as tracked by the orchestrator
    pub fn counts(&self) -> Census {
        Census {
            predators: self.predators,
            prey: self.prey,
        }
    }

    /// Counts found by scanning the grid
    pub fn census(&self) -> Census {
        self.grid.census()
    }

    pub fn is_extinct(&self) -> bool {
        self.counts().total() == 0
    }

    pub fn view(&self) -> WorldView {
        WorldView::capture(&self.grid, self.tick, self.counts())
    }
}
