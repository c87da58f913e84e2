//! Occupant state: breeding and starvation counters per organism.

use ecogrid_core::{Kind, OccupantId, OrganismConfig};
use serde::{Deserialize, Serialize};

/// A threshold and the ticks accumulated towards it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub threshold: u32,
    pub progress: u32,
}

impl Counter {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            progress: 0,
        }
    }

    /// Add one tick and report whether the threshold has been reached
    pub fn advance(&mut self) -> bool {
        self.progress = self.progress.saturating_add(1);
        self.reached()
    }

    pub fn reached(&self) -> bool {
        self.progress >= self.threshold
    }

    pub fn reset(&mut self) {
        self.progress = 0;
    }
}

/// Kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Eats adjacent prey; dies after `hunger.threshold` hungry ticks in a row
    Predator { hunger: Counter },
    /// Only moves and breeds
    Prey,
}

/// One organism placed in exactly one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub id: OccupantId,
    pub breeding: Counter,
    pub behavior: Behavior,
}

impl Occupant {
    pub fn new(id: OccupantId, kind: Kind, config: &OrganismConfig) -> Self {
        let behavior = match kind {
            Kind::Predator => Behavior::Predator {
                hunger: Counter::new(config.predator_starve_threshold),
            },
            Kind::Prey => Behavior::Prey,
        };

        Self {
            id,
            breeding: Counter::new(config.breed_threshold(kind)),
            behavior,
        }
    }

    pub fn predator(id: OccupantId, config: &OrganismConfig) -> Self {
        Self::new(id, Kind::Predator, config)
    }

    pub fn prey(id: OccupantId, config: &OrganismConfig) -> Self {
        Self::new(id, Kind::Prey, config)
    }

    pub fn kind(&self) -> Kind {
        match self.behavior {
            Behavior::Predator { .. } => Kind::Predator,
            Behavior::Prey => Kind::Prey,
        }
    }

    pub fn hunger(&self) -> Option<&Counter> {
        match &self.behavior {
            Behavior::Predator { hunger } => Some(hunger),
            Behavior::Prey => None,
        }
    }

    pub fn hunger_mut(&mut self) -> Option<&mut Counter> {
        match &mut self.behavior {
            Behavior::Predator { hunger } => Some(hunger),
            Behavior::Prey => None,
        }
    }

    /// A child of the same kind and thresholds with all progress at zero
    pub fn offspring(&self, id: OccupantId) -> Self {
        let behavior = match self.behavior {
            Behavior::Predator { hunger } => Behavior::Predator {
                hunger: Counter::new(hunger.threshold),
            },
            Behavior::Prey => Behavior::Prey,
        };

        Self {
            id,
            breeding: Counter::new(self.breeding.threshold),
            behavior,
        }
    }
}

/// Hands out occupant ids in creation order
#[derive(Debug, Clone, Default)]
pub struct OccupantIds {
    next: u64,
}

impl OccupantIds {
    /// Continue numbering after `last`
    pub fn after(last: Option<OccupantId>) -> Self {
        Self {
            next: last.map_or(0, |id| id.0 + 1),
        }
    }

    pub fn next_id(&mut self) -> OccupantId {
        let id = OccupantId(self.next);
        self.next += 1;
        id
    }
}
