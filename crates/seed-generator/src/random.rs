//! Seedable random source threaded through every generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seed_core::SubjectId;

/// Error type for invalid distribution tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError {
    /// Table has no entries
    #[error("Distribution table is empty")]
    Empty,

    /// A weight is negative, NaN or infinite
    #[error("Invalid weight {weight} at position {index}")]
    InvalidWeight { index: usize, weight: f64 },

    /// All weights are zero
    #[error("Distribution weights sum to zero")]
    ZeroTotal,
}

/// Validated `(value, weight)` table for weighted draws.
///
/// Weights need not sum to exactly 1.0; draws are proportional to them.
#[derive(Debug, Clone, Copy)]
pub struct WeightedTable<T: Copy + 'static> {
    entries: &'static [(T, f64)],
    total: f64,
    last: T,
}

impl<T: Copy + 'static> WeightedTable<T> {
    pub fn new(entries: &'static [(T, f64)]) -> Result<Self, DistributionError> {
        let (last, _) = *entries.last().ok_or(DistributionError::Empty)?;

        let mut total = 0.0;
        for (index, (_, weight)) in entries.iter().enumerate() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(DistributionError::InvalidWeight {
                    index,
                    weight: *weight,
                });
            }
            total += weight;
        }
        if total <= 0.0 {
            return Err(DistributionError::ZeroTotal);
        }

        Ok(Self {
            entries,
            total,
            last,
        })
    }

    pub fn entries(&self) -> &'static [(T, f64)] {
        self.entries
    }

    /// Values that can be drawn (non-zero weight).
    pub fn support(&self) -> impl Iterator<Item = T> + '_ {
        self.entries
            .iter()
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(value, _)| *value)
    }
}

/// Source of all randomness used during generation.
///
/// Each subject's run owns one instance, so seeded runs are reproducible
/// and concurrent runs never share RNG state.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a deterministic source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a non-deterministic source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create the source for one subject's run.
    ///
    /// With a base seed, every subject gets its own stream derived from the
    /// base seed and its id, independent of the order subjects run in.
    pub fn for_subject(base_seed: Option<u64>, subject_id: SubjectId) -> Self {
        match base_seed {
            Some(seed) => Self::seeded(subject_seed(seed, subject_id)),
            None => Self::from_entropy(),
        }
    }

    /// Uniform float in `[low, high]`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    /// Uniform integer in `[low, high]`.
    pub fn int_range(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    /// Weighted draw from a validated table.
    pub fn weighted<T: Copy + 'static>(&mut self, table: &WeightedTable<T>) -> T {
        let mut point = self.rng.gen_range(0.0..table.total);
        for (value, weight) in table.entries {
            if point < *weight {
                return *value;
            }
            point -= weight;
        }
        // float residue can leave a sliver past the last bucket
        table.last
    }
}

/// Mix a base seed with a subject id.
fn subject_seed(base_seed: u64, subject_id: SubjectId) -> u64 {
    base_seed.wrapping_add(subject_id.wrapping_mul(0x9E3779B97F4A7C15))
}
