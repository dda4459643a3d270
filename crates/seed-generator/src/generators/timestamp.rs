//! Time-of-day assignment for measurements.

use crate::random::{RandomSource, WeightedTable};
use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Draw of one time-of-day component (hour or minute).
#[derive(Debug, Clone, Copy)]
pub enum TimeDraw {
    /// Uniform over `[low, high]`
    Uniform { low: u32, high: u32 },
    /// Weighted over a fixed set
    Weighted(WeightedTable<u32>),
}

impl TimeDraw {
    pub fn draw(&self, rng: &mut RandomSource) -> u32 {
        match self {
            TimeDraw::Uniform { low, high } => {
                rng.int_range(i64::from(*low), i64::from(*high)) as u32
            }
            TimeDraw::Weighted(table) => rng.weighted(table),
        }
    }
}

/// Hour and minute distributions of one metric.
#[derive(Debug, Clone, Copy)]
pub struct TimingProfile {
    pub hours: TimeDraw,
    pub minutes: TimeDraw,
}

impl TimingProfile {
    /// Uniform hour in `[low, high]`, uniform minute.
    pub const fn uniform_hours(low: u32, high: u32) -> Self {
        Self {
            hours: TimeDraw::Uniform { low, high },
            minutes: TimeDraw::Uniform { low: 0, high: 59 },
        }
    }
}

/// Maps calendar dates to `measured_at` timestamps in a local timezone.
#[derive(Debug, Clone, Copy)]
pub struct TimestampAssigner {
    tz: Tz,
}

impl TimestampAssigner {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Draw a time of day from the profile and attach it to `date`.
    pub fn assign(
        &self,
        timing: &TimingProfile,
        date: NaiveDate,
        rng: &mut RandomSource,
    ) -> DateTime<FixedOffset> {
        let hour = timing.hours.draw(rng).min(23);
        let minute = timing.minutes.draw(rng).min(59);
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        self.localize(date, time)
    }

    /// Attach the local timezone to a wall-clock time.
    ///
    /// Ambiguous times take the earlier instant. Times in a DST gap move
    /// one hour forward, or one hour back when forward would leave `date`.
    pub fn localize(&self, date: NaiveDate, time: NaiveTime) -> DateTime<FixedOffset> {
        let local = date.and_time(time);
        let resolved = match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earlier, _) => earlier,
            LocalResult::None => [Duration::hours(1), Duration::hours(-1)]
                .into_iter()
                .map(|shift| local + shift)
                .filter(|shifted| shifted.date() == date)
                .find_map(|shifted| self.tz.from_local_datetime(&shifted).earliest())
                .unwrap_or_else(|| self.tz.from_utc_datetime(&local)),
        };
        resolved.fixed_offset()
    }
}
