//! Per-organism rules: wandering, breeding, and the predator's hunt.
//!
//! Each function acts on a single occupant against the live grid and reports
//! what happened through its return value. Population counts belong to the
//! caller, which folds these outcomes into its own bookkeeping.

use crate::grid::{Grid, Target};
use crate::organism::{Occupant, OccupantIds};
use ecogrid_core::{Error, Kind, OccupantId, RandomSelector, Result};
use tracing::trace;

/// Result of a single organism's movement for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No empty neighbour; the occupant did not move
    Stayed { at: usize },
    /// Relocated to an empty neighbour
    Moved { from: usize, to: usize },
    /// A predator ate the prey at `to` and took its cell
    Ate { from: usize, to: usize, prey: OccupantId },
    /// A predator reached its starvation threshold; it is still on the grid
    /// at `at` and the caller is responsible for removing it
    Starved { at: usize },
}

impl Outcome {
    /// Where the occupant ended up, or `None` if it died
    pub fn position(&self) -> Option<usize> {
        match *self {
            Outcome::Stayed { at } => Some(at),
            Outcome::Moved { to, .. } | Outcome::Ate { to, .. } => Some(to),
            Outcome::Starved { .. } => None,
        }
    }
}

fn describe(grid: &Grid, index: usize) -> String {
    match grid.get(index) {
        Some(occupant) => format!("{} {}", occupant.kind(), occupant.id),
        None => "an empty cell".to_string(),
    }
}

pub(crate) fn expect_kind(grid: &Grid, index: usize, kind: Kind) -> Result<()> {
    if grid.kind_at(index) == Some(kind) {
        Ok(())
    } else {
        Err(Error::UnexpectedOccupant {
            index,
            expected: kind,
            found: describe(grid, index),
        })
    }
}

/// Default movement: step into a random empty neighbour, or stay put
pub fn wander(grid: &mut Grid, selector: &mut RandomSelector, index: usize) -> Result<Outcome> {
    if grid.get(index).is_none() {
        return Err(Error::CellEmpty { index });
    }

    let empty = grid.find_adjacent(index, Target::Empty);
    match selector.choose(&empty) {
        Some(to) => {
            grid.relocate(index, to)?;
            Ok(Outcome::Moved { from: index, to })
        }
        None => Ok(Outcome::Stayed { at: index }),
    }
}

/// Predator movement: eat an adjacent prey if there is one, otherwise go
/// hungry and either starve or wander.
pub fn hunt(grid: &mut Grid, selector: &mut RandomSelector, index: usize) -> Result<Outcome> {
    expect_kind(grid, index, Kind::Predator)?;

    let food = grid.find_adjacent(index, Target::Occupied(Kind::Prey));
    if let Some(to) = selector.choose(&food) {
        let prey = grid.take(to).ok_or(Error::CellEmpty { index: to })?;
        grid.relocate(index, to)?;
        if let Some(hunger) = grid.get_mut(to).and_then(Occupant::hunger_mut) {
            hunger.reset();
        }

        trace!(
            event = "prey_eaten",
            prey_id = %prey.id,
            from = %grid.position_of(index),
            to = %grid.position_of(to),
            "Predator ate adjacent prey"
        );
        return Ok(Outcome::Ate {
            from: index,
            to,
            prey: prey.id,
        });
    }

    let starved = grid
        .get_mut(index)
        .and_then(Occupant::hunger_mut)
        .map(|hunger| hunger.advance())
        .ok_or(Error::CellEmpty { index })?;

    if starved {
        trace!(
            event = "predator_starved",
            at = %grid.position_of(index),
            "Predator starved"
        );
        return Ok(Outcome::Starved { at: index });
    }

    wander(grid, selector, index)
}

/// Count one more tick towards breeding and, once past the threshold, place
/// a fresh child of the same kind in a random empty neighbour.
///
/// Returns the child's cell. When no neighbour is free the progress is kept,
/// so the occupant tries again on every following tick.
pub fn breed_control(
    grid: &mut Grid,
    selector: &mut RandomSelector,
    ids: &mut OccupantIds,
    index: usize,
) -> Result<Option<usize>> {
    let ready = grid
        .get_mut(index)
        .map(|parent| parent.breeding.advance())
        .ok_or(Error::CellEmpty { index })?;

    if !ready {
        return Ok(None);
    }

    let empty = grid.find_adjacent(index, Target::Empty);
    let Some(child_index) = selector.choose(&empty) else {
        trace!(
            event = "breeding_skipped",
            at = %grid.position_of(index),
            "No empty neighbour to breed into"
        );
        return Ok(None);
    };

    let child = {
        let parent = grid.get_mut(index).ok_or(Error::CellEmpty { index })?;
        parent.breeding.reset();
        parent.offspring(ids.next_id())
    };

    trace!(
        event = "organism_born",
        kind = %child.kind(),
        child_id = %child.id,
        parent_at = %grid.position_of(index),
        child_at = %grid.position_of(child_index),
        "Organism bred"
    );
    grid.place(child_index, child)?;

    Ok(Some(child_index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecogrid_core::OrganismConfig;

    fn grid_with(layout: &[(usize, Kind)]) -> (Grid, OccupantIds) {
        let config = OrganismConfig::default();
        let mut grid = Grid::new(3, 3).unwrap();
        let mut ids = OccupantIds::default();
        for &(index, kind) in layout {
            let occupant = Occupant::new(ids.next_id(), kind, &config);
            grid.place(index, occupant).unwrap();
        }
        (grid, ids)
    }

    #[test]
    fn test_wander_moves_to_empty_neighbor() {
        let (mut grid, _) = grid_with(&[(4, Kind::Prey)]);
        let mut selector = RandomSelector::seeded(3);

        let outcome = wander(&mut grid, &mut selector, 4).unwrap();
        let Outcome::Moved { from, to } = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert_eq!(from, 4);
        assert!([1, 3, 5, 7].contains(&to));
        assert!(grid.is_vacant(4));
        assert_eq!(grid.get(to).map(|o| o.id), Some(OccupantId(0)));
    }

    #[test]
    fn test_wander_stays_when_boxed_in() {
        let (mut grid, _) = grid_with(&[
            (0, Kind::Prey),
            (1, Kind::Prey),
            (3, Kind::Predator),
        ]);
        let mut selector = RandomSelector::seeded(3);

        assert_eq!(
            wander(&mut grid, &mut selector, 0).unwrap(),
            Outcome::Stayed { at: 0 }
        );
        assert_eq!(grid.kind_at(0), Some(Kind::Prey));
    }

    #[test]
    fn test_hunt_eats_only_adjacent_prey() {
        let (mut grid, _) = grid_with(&[(4, Kind::Predator), (1, Kind::Prey), (0, Kind::Prey)]);
        let mut selector = RandomSelector::seeded(11);
        grid.get_mut(4).unwrap().hunger_mut().unwrap().progress = 2;

        let outcome = hunt(&mut grid, &mut selector, 4).unwrap();
        assert_eq!(
            outcome,
            Outcome::Ate {
                from: 4,
                to: 1,
                prey: OccupantId(1)
            }
        );
        assert!(grid.is_vacant(4));
        assert_eq!(grid.kind_at(1), Some(Kind::Predator));
        assert_eq!(grid.get(1).unwrap().hunger().unwrap().progress, 0);
        // The diagonal prey is untouched
        assert_eq!(grid.kind_at(0), Some(Kind::Prey));
    }

    #[test]
    fn test_hunt_without_food_goes_hungry_then_starves() {
        let (mut grid, _) = grid_with(&[
            (0, Kind::Predator),
            (1, Kind::Predator),
            (3, Kind::Predator),
        ]);
        let mut selector = RandomSelector::seeded(5);

        // Boxed in at the corner: stays in place while hungry
        assert_eq!(
            hunt(&mut grid, &mut selector, 0).unwrap(),
            Outcome::Stayed { at: 0 }
        );
        assert_eq!(
            hunt(&mut grid, &mut selector, 0).unwrap(),
            Outcome::Stayed { at: 0 }
        );
        assert_eq!(
            hunt(&mut grid, &mut selector, 0).unwrap(),
            Outcome::Starved { at: 0 }
        );
        // Removal is the caller's job
        assert_eq!(grid.kind_at(0), Some(Kind::Predator));
    }

    #[test]
    fn test_hunt_rejects_non_predator() {
        let (mut grid, _) = grid_with(&[(4, Kind::Prey)]);
        let mut selector = RandomSelector::seeded(5);

        let err = hunt(&mut grid, &mut selector, 4).unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(hunt(&mut grid, &mut selector, 0).unwrap_err().is_invariant_violation());
    }

    #[test]
    fn test_breed_waits_for_threshold() {
        let (mut grid, mut ids) = grid_with(&[(4, Kind::Prey)]);
        let mut selector = RandomSelector::seeded(9);

        assert_eq!(breed_control(&mut grid, &mut selector, &mut ids, 4).unwrap(), None);
        assert_eq!(breed_control(&mut grid, &mut selector, &mut ids, 4).unwrap(), None);

        let child = breed_control(&mut grid, &mut selector, &mut ids, 4)
            .unwrap()
            .expect("prey breeds on its third tick");
        assert!([1, 3, 5, 7].contains(&child));

        let born = grid.get(child).unwrap();
        assert_eq!(born.kind(), Kind::Prey);
        assert_eq!(born.id, OccupantId(1));
        assert_eq!(born.breeding.progress, 0);
        assert_eq!(grid.get(4).unwrap().breeding.progress, 0);
    }

    #[test]
    fn test_breed_keeps_progress_when_blocked() {
        // Prey in the corner, both neighbours taken
        let (mut grid, mut ids) = grid_with(&[
            (0, Kind::Prey),
            (1, Kind::Predator),
            (3, Kind::Predator),
        ]);
        let mut selector = RandomSelector::seeded(9);

        for _ in 0..5 {
            assert_eq!(breed_control(&mut grid, &mut selector, &mut ids, 0).unwrap(), None);
        }
        assert_eq!(grid.get(0).unwrap().breeding.progress, 5);

        // Space opens up: breeds on the very next tick
        grid.take(3);
        assert_eq!(
            breed_control(&mut grid, &mut selector, &mut ids, 0).unwrap(),
            Some(3)
        );
        assert_eq!(grid.get(0).unwrap().breeding.progress, 0);
        assert_eq!(grid.kind_at(3), Some(Kind::Prey));
    }

    #[test]
    fn test_outcome_position() {
        assert_eq!(Outcome::Stayed { at: 2 }.position(), Some(2));
        assert_eq!(Outcome::Moved { from: 2, to: 5 }.position(), Some(5));
        assert_eq!(Outcome::Starved { at: 2 }.position(), None);
    }
}
