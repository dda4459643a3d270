//! Per-subject run summaries and the printed report.

use seed_core::{
    DateRange, MeasurementRecord, MetricKind, RecordKind, Subject, VaccinationRecord,
    VaccinationStatus,
};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Outcome of generating one subject's data.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// The subject the records were generated for.
    pub subject: Subject,
    /// Date range covered.
    pub range: DateRange,
    /// Measurements written, per metric.
    pub measurements: BTreeMap<MetricKind, u64>,
    /// Measurements removed by the clear step.
    pub cleared_measurements: u64,
    /// Vaccinations removed by the clear step.
    pub cleared_vaccinations: u64,
    /// Completed doses written.
    pub completed_vaccinations: u64,
    /// Pending boosters written.
    pub pending_vaccinations: u64,
    /// Last weight value of the run.
    pub final_weight: Option<f64>,
    /// Last length value of the run.
    pub final_length: Option<f64>,
    /// Wall time of the run.
    pub duration: Duration,
}

impl GenerationSummary {
    pub fn new(subject: Subject, range: DateRange) -> Self {
        Self {
            subject,
            range,
            measurements: BTreeMap::new(),
            cleared_measurements: 0,
            cleared_vaccinations: 0,
            completed_vaccinations: 0,
            pending_vaccinations: 0,
            final_weight: None,
            final_length: None,
            duration: Duration::ZERO,
        }
    }

    pub(crate) fn record_cleared(&mut self, kind: RecordKind, count: u64) {
        match kind {
            RecordKind::Measurement => self.cleared_measurements += count,
            RecordKind::Vaccination => self.cleared_vaccinations += count,
        }
    }

    pub(crate) fn record_measurement(&mut self, record: &MeasurementRecord) {
        *self.measurements.entry(record.metric()).or_default() += 1;
    }

    pub(crate) fn record_vaccination(&mut self, record: &VaccinationRecord) {
        match record.status() {
            VaccinationStatus::Completed => self.completed_vaccinations += 1,
            VaccinationStatus::Pending => self.pending_vaccinations += 1,
        }
    }

    /// Measurements written for one metric.
    pub fn count(&self, metric: MetricKind) -> u64 {
        self.measurements.get(&metric).copied().unwrap_or(0)
    }

    pub fn total_measurements(&self) -> u64 {
        self.measurements.values().sum()
    }

    pub fn total_vaccinations(&self) -> u64 {
        self.completed_vaccinations + self.pending_vaccinations
    }

    /// Days in the generated range.
    pub fn days(&self) -> u32 {
        self.range.days()
    }

    /// Final weight minus baseline weight.
    pub fn weight_change(&self) -> Option<f64> {
        self.final_weight.map(|w| w - self.subject.base_weight)
    }

    /// Final length minus baseline length.
    pub fn length_change(&self) -> Option<f64> {
        self.final_length.map(|l| l - self.subject.base_length())
    }

    /// Records written per second.
    pub fn records_per_second(&self) -> f64 {
        let records = (self.total_measurements() + self.total_vaccinations()) as f64;
        if self.duration.as_secs_f64() > 0.0 {
            records / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Human-readable report over the summaries of one run.
pub struct RunReport<'a> {
    range: DateRange,
    summaries: &'a [GenerationSummary],
}

impl<'a> RunReport<'a> {
    pub fn new(range: DateRange, summaries: &'a [GenerationSummary]) -> Self {
        Self { range, summaries }
    }

    fn total(&self, f: impl Fn(&GenerationSummary) -> u64) -> u64 {
        self.summaries.iter().map(f).sum()
    }
}

const RULE: &str = "==================================================";

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "SEED DATA SUMMARY")?;
        writeln!(f, "{RULE}")?;

        for summary in self.summaries {
            let subject = &summary.subject;
            writeln!(f)?;
            writeln!(f, "{} (ID: {})", subject.name, subject.id)?;
            writeln!(f, "   Species: {}", subject.species)?;
            writeln!(f, "   Color: {}", subject.color)?;
            writeln!(f, "   Gender: {}", subject.gender)?;
            writeln!(f, "   Microchip: {}", subject.microchip_number)?;
            writeln!(
                f,
                "   Total Health Records: {}",
                summary.total_measurements()
            )?;
            writeln!(
                f,
                "   Weight Records: {} (daily)",
                summary.count(MetricKind::Weight)
            )?;
            writeln!(
                f,
                "   Length Records: {} (weekly)",
                summary.count(MetricKind::Length)
            )?;
            writeln!(
                f,
                "   Vaccinations: {} ({} completed, {} pending)",
                summary.total_vaccinations(),
                summary.completed_vaccinations,
                summary.pending_vaccinations
            )?;
            if let (Some(weight), Some(change)) = (summary.final_weight, summary.weight_change()) {
                writeln!(f, "   Final Weight: {weight:.2} kg ({change:+.2})")?;
            }
            if let (Some(length), Some(change)) = (summary.final_length, summary.length_change()) {
                writeln!(f, "   Final Length: {length:.1} cm ({change:+.1})")?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Date Range: {} to {}",
            self.range.start(),
            self.range.end()
        )?;
        writeln!(f, "Total Days: {}", self.range.days())?;
        writeln!(f, "Total Subjects: {}", self.summaries.len())?;
        writeln!(
            f,
            "Total Health Records: {}",
            self.total(GenerationSummary::total_measurements)
        )?;
        writeln!(
            f,
            "Total Weight Records: {}",
            self.total(|s| s.count(MetricKind::Weight))
        )?;
        writeln!(
            f,
            "Total Length Records: {}",
            self.total(|s| s.count(MetricKind::Length))
        )?;
        writeln!(
            f,
            "Total Vaccinations: {}",
            self.total(GenerationSummary::total_vaccinations)
        )?;
        write!(f, "{RULE}")
    }
}
