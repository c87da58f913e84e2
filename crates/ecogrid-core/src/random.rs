//! Uniform random selection over integer intervals.

use crate::{Error, Result};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded source of uniform choices used by the engine
///
/// The entry point seeds it once; everything downstream only draws from it.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: ChaCha8Rng,
}

impl RandomSelector {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform integer in the closed interval `[low, high]`
    pub fn int_in_interval(&mut self, low: usize, high: usize) -> Result<usize> {
        if low > high {
            return Err(Error::EmptyInterval { low, high });
        }
        Ok(self.rng.gen_range(low..=high))
    }

    /// `count` distinct integers from `[low, high]`, drawn without replacement
    pub fn distinct_in_interval(
        &mut self,
        low: usize,
        high: usize,
        count: usize,
    ) -> Result<Vec<usize>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if low > high {
            return Err(Error::EmptyInterval { low, high });
        }

        let span = high - low + 1;
        if count > span {
            return Err(Error::Overpopulated {
                requested: count,
                cells: span,
            });
        }

        Ok(index::sample(&mut self.rng, span, count)
            .into_iter()
            .map(|offset| low + offset)
            .collect())
    }

    /// Uniform pick among `candidates`, `None` when there are none
    pub fn choose(&mut self, candidates: &[usize]) -> Option<usize> {
        match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            len => Some(candidates[self.rng.gen_range(0..len)]),
        }
    }
}
