//! Which periodic metrics are due on a given day.

use seed_core::{Cadence, MetricKind};

/// Decides the due metrics for a day offset from the start date.
#[derive(Debug, Clone)]
pub struct CadenceScheduler {
    metrics: Vec<MetricKind>,
}

impl CadenceScheduler {
    /// Scheduler over the given metrics; due metrics keep this order.
    pub fn new(metrics: impl IntoIterator<Item = MetricKind>) -> Self {
        Self {
            metrics: metrics.into_iter().collect(),
        }
    }

    /// Metrics due at day offset `t`.
    ///
    /// Daily metrics are always due; every-n-days metrics when `t % n == 0`,
    /// so the start date has every metric due.
    pub fn due(&self, offset: u32) -> impl Iterator<Item = MetricKind> + '_ {
        self.metrics
            .iter()
            .copied()
            .filter(move |metric| metric.cadence().is_due(offset))
    }

    /// Number of times a metric is due over `days` consecutive days from offset 0.
    pub fn expected_count(metric: MetricKind, days: u32) -> u32 {
        match metric.cadence() {
            Cadence::Daily => days,
            Cadence::EveryNDays(0) => 0,
            Cadence::EveryNDays(n) => days.div_ceil(n),
        }
    }
}

impl Default for CadenceScheduler {
    fn default() -> Self {
        Self::new(MetricKind::ALL)
    }
}
