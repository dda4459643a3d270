//! Per-subject, per-day measurement generator.

use crate::generators::cadence::CadenceScheduler;
use crate::generators::categorical::CategoricalSampler;
use crate::generators::quantity::QuantityDraw;
use crate::generators::timestamp::{TimestampAssigner, TimingProfile};
use crate::generators::trend::TrendSimulator;
use crate::profile::{standard_profiles, Generation, MetricProfile};
use crate::random::{DistributionError, RandomSource};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use seed_core::{
    CoatCondition, Label, MeasurementRecord, MetricKind, Mood, RecordError, Subject, SubjectId,
};
use std::collections::BTreeMap;

/// Value source of one metric, with its trend state if it has one.
enum Source {
    Trend(TrendSimulator),
    Quantity(QuantityDraw),
    Mood(CategoricalSampler<Mood>),
    Coat(CategoricalSampler<CoatCondition>),
}

enum Draw {
    Value(f64),
    Label(Label),
}

struct Channel {
    timing: TimingProfile,
    source: Source,
}

impl Channel {
    fn new(profile: MetricProfile, base_weight: f64) -> Self {
        let source = match profile.generation {
            Generation::Trend { profile, baseline } => {
                Source::Trend(TrendSimulator::new(profile, baseline.of(base_weight)))
            }
            Generation::Quantity(quantity) => Source::Quantity(quantity),
            Generation::Mood(sampler) => Source::Mood(sampler),
            Generation::Coat(sampler) => Source::Coat(sampler),
        };
        Self {
            timing: profile.timing,
            source,
        }
    }

    fn draw(&mut self, offset: u32, base_weight: f64, rng: &mut RandomSource) -> Draw {
        match &mut self.source {
            Source::Trend(trend) => Draw::Value(trend.step(offset, rng)),
            Source::Quantity(quantity) => Draw::Value(quantity.draw(base_weight, rng) as f64),
            Source::Mood(sampler) => Draw::Label(sampler.sample(rng).into()),
            Source::Coat(sampler) => Draw::Label(sampler.sample(rng).into()),
        }
    }

    fn trend(&self) -> Option<&TrendSimulator> {
        match &self.source {
            Source::Trend(trend) => Some(trend),
            _ => None,
        }
    }
}

/// Generates a subject's measurements one day at a time.
///
/// Trend state (current weight and length) lives in the generator, so one
/// instance covers exactly one subject's run and nothing leaks across
/// subjects.
pub struct SeriesGenerator {
    subject_id: SubjectId,
    base_weight: f64,
    rng: RandomSource,
    scheduler: CadenceScheduler,
    assigner: TimestampAssigner,
    channels: BTreeMap<MetricKind, Channel>,
}

impl SeriesGenerator {
    /// Create a generator with the standard metric profiles.
    pub fn new(subject: &Subject, tz: Tz, rng: RandomSource) -> Result<Self, DistributionError> {
        Ok(Self::with_profiles(subject, tz, rng, standard_profiles()?))
    }

    /// Create a generator over a custom set of profiles.
    ///
    /// Only metrics with a profile are ever emitted.
    pub fn with_profiles(
        subject: &Subject,
        tz: Tz,
        rng: RandomSource,
        profiles: impl IntoIterator<Item = MetricProfile>,
    ) -> Self {
        let channels: BTreeMap<_, _> = profiles
            .into_iter()
            .map(|profile| (profile.metric, Channel::new(profile, subject.base_weight)))
            .collect();

        Self {
            subject_id: subject.id,
            base_weight: subject.base_weight,
            rng,
            scheduler: CadenceScheduler::default(),
            assigner: TimestampAssigner::new(tz),
            channels,
        }
    }

    /// Generate the measurements due at day offset `offset`, dated `date`.
    pub fn day(
        &mut self,
        offset: u32,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Vec<MeasurementRecord>, RecordError> {
        let mut records = Vec::with_capacity(self.channels.len());

        for metric in self.scheduler.due(offset) {
            let Some(channel) = self.channels.get_mut(&metric) else {
                continue;
            };

            let draw = channel.draw(offset, self.base_weight, &mut self.rng);
            let measured_at = self
                .assigner
                .assign(&channel.timing, date, &mut self.rng);

            let record = match draw {
                Draw::Value(value) => MeasurementRecord::quantity(
                    self.subject_id,
                    metric,
                    value,
                    measured_at,
                    created_at,
                )?,
                Draw::Label(label) => {
                    MeasurementRecord::categorical(self.subject_id, label, measured_at, created_at)
                }
            };
            records.push(record);
        }

        Ok(records)
    }

    /// Current value of a trend metric, rounded like its emitted values.
    pub fn trend_value(&self, metric: MetricKind) -> Option<f64> {
        self.channels.get(&metric)?.trend().map(TrendSimulator::value)
    }

    /// Baseline of a trend metric.
    pub fn trend_baseline(&self, metric: MetricKind) -> Option<f64> {
        self.channels
            .get(&metric)?
            .trend()
            .map(TrendSimulator::baseline)
    }

    /// The random source, for draws that follow the daily series.
    pub fn rng_mut(&mut self) -> &mut RandomSource {
        &mut self.rng
    }
}
