//! Weighted draws of categorical states.

use crate::random::{DistributionError, RandomSource, WeightedTable};

/// Draws one label per call from a fixed weighted distribution.
///
/// No state is carried between calls; draws are independent.
#[derive(Debug, Clone, Copy)]
pub struct CategoricalSampler<L: Copy + 'static> {
    table: WeightedTable<L>,
}

impl<L: Copy + 'static> CategoricalSampler<L> {
    pub fn new(weights: &'static [(L, f64)]) -> Result<Self, DistributionError> {
        Ok(Self {
            table: WeightedTable::new(weights)?,
        })
    }

    pub fn sample(&self, rng: &mut RandomSource) -> L {
        rng.weighted(&self.table)
    }

    pub fn table(&self) -> &WeightedTable<L> {
        &self.table
    }
}
