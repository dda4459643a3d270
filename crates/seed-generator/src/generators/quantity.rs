//! Bounded random draws for daily count-like metrics.

use crate::random::{RandomSource, WeightedTable};

/// Baseline derived linearly from body weight: `intercept + slope·(w − pivot)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearBaseline {
    pub intercept: f64,
    pub slope: f64,
    pub pivot: f64,
}

impl LinearBaseline {
    /// The weight itself.
    pub const IDENTITY: LinearBaseline = LinearBaseline {
        intercept: 0.0,
        slope: 1.0,
        pivot: 0.0,
    };

    pub fn of(&self, weight: f64) -> f64 {
        self.intercept + self.slope * (weight - self.pivot)
    }
}

/// Stateless draw of an integer quantity.
#[derive(Debug, Clone, Copy)]
pub enum QuantityDraw {
    /// Uniform over `[b − below, b + above]` with `b` the truncated baseline
    AroundBaseline {
        baseline: LinearBaseline,
        below: i64,
        above: i64,
    },
    /// Weighted over a fixed set of counts
    Counts(WeightedTable<i64>),
}

impl QuantityDraw {
    /// Inclusive range of possible values for a subject of the given weight.
    pub fn range(&self, weight: f64) -> (i64, i64) {
        match self {
            QuantityDraw::AroundBaseline {
                baseline,
                below,
                above,
            } => {
                let b = baseline.of(weight) as i64;
                (b - below, b + above)
            }
            QuantityDraw::Counts(table) => {
                let mut support = table.support();
                let first = support.next().unwrap_or_default();
                support.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
            }
        }
    }

    pub fn draw(&self, weight: f64, rng: &mut RandomSource) -> i64 {
        match self {
            QuantityDraw::AroundBaseline { .. } => {
                let (low, high) = self.range(weight);
                rng.int_range(low, high)
            }
            QuantityDraw::Counts(table) => rng.weighted(table),
        }
    }
}
