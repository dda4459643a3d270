//! Per-metric generation tables.
//!
//! Every metric is described by data: how its value is produced and when
//! during the day it is measured. Adding a metric to [`MetricKind`] forces a
//! new arm in [`MetricProfile::standard`].

use crate::generators::categorical::CategoricalSampler;
use crate::generators::quantity::{LinearBaseline, QuantityDraw};
use crate::generators::timestamp::{TimeDraw, TimingProfile};
use crate::generators::trend::{Bounds, TrendProfile};
use crate::random::{DistributionError, WeightedTable};
use seed_core::{CoatCondition, MetricKind, Mood};

static WEIGHT_HOURS: &[(u32, f64)] = &[
    (7, 0.3),
    (8, 0.4),
    (9, 0.2),
    (10, 0.05),
    (18, 0.03),
    (19, 0.02),
];

static LENGTH_HOURS: &[(u32, f64)] = &[(10, 0.3), (11, 0.3), (14, 0.2), (15, 0.2)];

static LENGTH_MINUTES: &[(u32, f64)] = &[(0, 0.4), (15, 0.2), (30, 0.2), (45, 0.2)];

static BOWEL_COUNTS: &[(i64, f64)] = &[(1, 0.4), (2, 0.5), (3, 0.1)];

static URINATION_COUNTS: &[(i64, f64)] = &[(2, 0.3), (3, 0.4), (4, 0.25), (5, 0.05)];

static MOODS: &[(Mood, f64)] = &[
    (Mood::Normal, 0.75),
    (Mood::Lethargic, 0.10),
    (Mood::Hyperactive, 0.08),
    (Mood::Aggressive, 0.03),
    (Mood::Clingy, 0.04),
];

static COAT_CONDITIONS: &[(CoatCondition, f64)] = &[
    (CoatCondition::Normal, 0.65),
    (CoatCondition::Shedding, 0.25),
    (CoatCondition::HairLoss, 0.03),
    (CoatCondition::Dry, 0.04),
    (CoatCondition::Dull, 0.03),
];

/// Daily weight: ±0.03 kg steps, yearly seasonal swing, hard ±10% clamp.
pub const WEIGHT_TREND: TrendProfile = TrendProfile {
    step: 0.03,
    seasonal_amplitude: 0.02,
    seasonal_frequency: 0.017,
    reversion: 0.0,
    growth_per_year: 0.0,
    bounds: Bounds::Relative(0.1),
    precision: 2,
};

/// Weekly length: ±1 cm measurement noise around a slow growth line.
pub const LENGTH_TREND: TrendProfile = TrendProfile {
    step: 1.0,
    seasonal_amplitude: 0.0,
    seasonal_frequency: 0.0,
    reversion: 1.0,
    growth_per_year: 0.5,
    bounds: Bounds::Absolute {
        below: 3.0,
        above: 5.0,
    },
    precision: 1,
};

/// 48 cm at 2.5 kg, 3 cm per additional kilogram.
pub const LENGTH_BASELINE: LinearBaseline = LinearBaseline {
    intercept: 48.0,
    slope: 3.0,
    pivot: 2.5,
};

/// How a metric's value is produced.
#[derive(Debug, Clone, Copy)]
pub enum Generation {
    /// Stateful trend around a weight-derived baseline
    Trend {
        profile: TrendProfile,
        baseline: LinearBaseline,
    },
    /// Independent bounded draw
    Quantity(QuantityDraw),
    /// Independent mood draw
    Mood(CategoricalSampler<Mood>),
    /// Independent coat condition draw
    Coat(CategoricalSampler<CoatCondition>),
}

/// Everything needed to generate one metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricProfile {
    pub metric: MetricKind,
    pub generation: Generation,
    pub timing: TimingProfile,
}

impl MetricProfile {
    /// The standard profile of a metric.
    pub fn standard(metric: MetricKind) -> Result<Self, DistributionError> {
        let (generation, timing) = match metric {
            MetricKind::Weight => (
                Generation::Trend {
                    profile: WEIGHT_TREND,
                    baseline: LinearBaseline::IDENTITY,
                },
                TimingProfile {
                    hours: TimeDraw::Weighted(WeightedTable::new(WEIGHT_HOURS)?),
                    minutes: TimeDraw::Uniform { low: 0, high: 59 },
                },
            ),
            MetricKind::Length => (
                Generation::Trend {
                    profile: LENGTH_TREND,
                    baseline: LENGTH_BASELINE,
                },
                TimingProfile {
                    hours: TimeDraw::Weighted(WeightedTable::new(LENGTH_HOURS)?),
                    minutes: TimeDraw::Weighted(WeightedTable::new(LENGTH_MINUTES)?),
                },
            ),
            MetricKind::WaterIntake => (
                // cats drink roughly 50 ml per kg
                Generation::Quantity(QuantityDraw::AroundBaseline {
                    baseline: LinearBaseline {
                        intercept: 0.0,
                        slope: 50.0,
                        pivot: 0.0,
                    },
                    below: 30,
                    above: 80,
                }),
                TimingProfile::uniform_hours(6, 22),
            ),
            MetricKind::ActivityLevel => (
                Generation::Quantity(QuantityDraw::AroundBaseline {
                    baseline: LinearBaseline {
                        intercept: 120.0,
                        slope: 10.0,
                        pivot: 2.5,
                    },
                    below: 40,
                    above: 60,
                }),
                TimingProfile::uniform_hours(18, 23),
            ),
            MetricKind::BowelMovements => (
                Generation::Quantity(QuantityDraw::Counts(WeightedTable::new(BOWEL_COUNTS)?)),
                TimingProfile::uniform_hours(8, 20),
            ),
            MetricKind::UrinationFrequency => (
                Generation::Quantity(QuantityDraw::Counts(WeightedTable::new(
                    URINATION_COUNTS,
                )?)),
                TimingProfile::uniform_hours(7, 21),
            ),
            MetricKind::Mood => (
                Generation::Mood(CategoricalSampler::new(MOODS)?),
                TimingProfile::uniform_hours(9, 21),
            ),
            MetricKind::CoatCondition => (
                Generation::Coat(CategoricalSampler::new(COAT_CONDITIONS)?),
                TimingProfile::uniform_hours(10, 16),
            ),
        };

        Ok(Self {
            metric,
            generation,
            timing,
        })
    }
}

/// Standard profiles for all metrics, in [`MetricKind::ALL`] order.
pub fn standard_profiles() -> Result<Vec<MetricProfile>, DistributionError> {
    MetricKind::ALL
        .into_iter()
        .map(MetricProfile::standard)
        .collect()
}
