//! Generated output rows: health measurements and vaccinations.

use crate::metric::{Label, MetricKind, Unit};
use crate::subject::SubjectId;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a record by the sink.
pub type RecordId = u64;

/// Error type for record construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// A numeric value was given for a categorical metric
    #[error("Metric '{0}' is categorical and cannot carry a numeric value")]
    NotQuantitative(MetricKind),

    /// A stored row has neither or both of value and label, or they do not match the metric
    #[error("Malformed '{metric}' row: {reason}")]
    MalformedRow { metric: MetricKind, reason: String },
}

/// The payload of a measurement: a value with its unit, or a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Quantity { value: f64, unit: Unit },
    Label(Label),
}

/// One measurement of one metric for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeasurementRow", into = "MeasurementRow")]
pub struct MeasurementRecord {
    subject_id: SubjectId,
    metric: MetricKind,
    reading: Reading,
    measured_at: DateTime<FixedOffset>,
    created_at: DateTime<Utc>,
}

impl MeasurementRecord {
    /// Create a quantitative record; the unit comes from the metric kind.
    pub fn quantity(
        subject_id: SubjectId,
        metric: MetricKind,
        value: f64,
        measured_at: DateTime<FixedOffset>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RecordError> {
        let unit = metric
            .unit()
            .ok_or(RecordError::NotQuantitative(metric))?;
        Ok(Self {
            subject_id,
            metric,
            reading: Reading::Quantity { value, unit },
            measured_at,
            created_at,
        })
    }

    /// Create a categorical record; the metric comes from the label.
    pub fn categorical(
        subject_id: SubjectId,
        label: Label,
        measured_at: DateTime<FixedOffset>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_id,
            metric: label.metric(),
            reading: Reading::Label(label),
            measured_at,
            created_at,
        }
    }

    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }

    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    /// Numeric value, `None` for categorical records.
    pub fn value(&self) -> Option<f64> {
        match self.reading {
            Reading::Quantity { value, .. } => Some(value),
            Reading::Label(_) => None,
        }
    }

    /// Unit, `None` for categorical records.
    pub fn unit(&self) -> Option<Unit> {
        match self.reading {
            Reading::Quantity { unit, .. } => Some(unit),
            Reading::Label(_) => None,
        }
    }

    /// Label, `None` for quantitative records.
    pub fn label(&self) -> Option<Label> {
        match self.reading {
            Reading::Quantity { .. } => None,
            Reading::Label(label) => Some(label),
        }
    }

    pub fn measured_at(&self) -> DateTime<FixedOffset> {
        self.measured_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Persisted shape of a measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeasurementRow {
    subject_id: SubjectId,
    attribute_name: MetricKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    measured_at: DateTime<FixedOffset>,
    created_at: DateTime<Utc>,
}

impl From<MeasurementRecord> for MeasurementRow {
    fn from(record: MeasurementRecord) -> Self {
        Self {
            subject_id: record.subject_id,
            attribute_name: record.metric,
            value: record.value(),
            unit: record.unit(),
            label: record.label().map(|l| l.as_str().to_string()),
            measured_at: record.measured_at,
            created_at: record.created_at,
        }
    }
}

impl TryFrom<MeasurementRow> for MeasurementRecord {
    type Error = RecordError;

    fn try_from(row: MeasurementRow) -> Result<Self, Self::Error> {
        let metric = row.attribute_name;
        let malformed = |reason: &str| RecordError::MalformedRow {
            metric,
            reason: reason.to_string(),
        };

        match (row.value, row.label) {
            (Some(value), None) => {
                let record = Self::quantity(
                    row.subject_id,
                    metric,
                    value,
                    row.measured_at,
                    row.created_at,
                )?;
                if row.unit.is_some() && row.unit != record.unit() {
                    return Err(malformed("unit does not match metric"));
                }
                Ok(record)
            }
            (None, Some(label)) => {
                let label = Label::parse(metric, &label)
                    .ok_or_else(|| malformed("unknown label"))?;
                Ok(Self::categorical(
                    row.subject_id,
                    label,
                    row.measured_at,
                    row.created_at,
                ))
            }
            (Some(_), Some(_)) => Err(malformed("both value and label are set")),
            (None, None) => Err(malformed("neither value nor label is set")),
        }
    }
}

/// Lifecycle state of a vaccination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaccinationStatus {
    Completed,
    Pending,
}

/// One vaccination, either given or scheduled.
///
/// A completed dose and its pending booster are two independent records,
/// linked only by vaccine name and date arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    subject_id: SubjectId,
    vaccination_name: String,
    vaccination_status: VaccinationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vaccinated_at: Option<NaiveDate>,
    schedule_at: NaiveDate,
    vaccination_notes: String,
}

impl VaccinationRecord {
    /// A dose given on `vaccinated_at`.
    ///
    /// Without an explicit schedule the record is scheduled on the day it was
    /// given. A schedule earlier than the dose is moved up to the dose date.
    pub fn completed(
        subject_id: SubjectId,
        name: impl Into<String>,
        vaccinated_at: NaiveDate,
        schedule_at: Option<NaiveDate>,
        notes: impl Into<String>,
    ) -> Self {
        let schedule_at = schedule_at.map_or(vaccinated_at, |s| s.max(vaccinated_at));
        Self {
            subject_id,
            vaccination_name: name.into(),
            vaccination_status: VaccinationStatus::Completed,
            vaccinated_at: Some(vaccinated_at),
            schedule_at,
            vaccination_notes: notes.into(),
        }
    }

    /// A dose scheduled for `schedule_at` that has not been given yet.
    pub fn pending(
        subject_id: SubjectId,
        name: impl Into<String>,
        schedule_at: NaiveDate,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            subject_id,
            vaccination_name: name.into(),
            vaccination_status: VaccinationStatus::Pending,
            vaccinated_at: None,
            schedule_at,
            vaccination_notes: notes.into(),
        }
    }

    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }

    pub fn name(&self) -> &str {
        &self.vaccination_name
    }

    pub fn status(&self) -> VaccinationStatus {
        self.vaccination_status
    }

    pub fn vaccinated_at(&self) -> Option<NaiveDate> {
        self.vaccinated_at
    }

    pub fn schedule_at(&self) -> NaiveDate {
        self.schedule_at
    }

    pub fn notes(&self) -> &str {
        &self.vaccination_notes
    }
}

/// Kind of record a sink stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Measurement,
    Vaccination,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Measurement => f.write_str("health"),
            RecordKind::Vaccination => f.write_str("vaccination"),
        }
    }
}

/// Any record the generator hands to a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Measurement(MeasurementRecord),
    Vaccination(VaccinationRecord),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Measurement(_) => RecordKind::Measurement,
            Record::Vaccination(_) => RecordKind::Vaccination,
        }
    }

    pub fn subject_id(&self) -> SubjectId {
        match self {
            Record::Measurement(m) => m.subject_id(),
            Record::Vaccination(v) => v.subject_id(),
        }
    }
}

impl From<MeasurementRecord> for Record {
    fn from(record: MeasurementRecord) -> Self {
        Record::Measurement(record)
    }
}

impl From<VaccinationRecord> for Record {
    fn from(record: VaccinationRecord) -> Self {
        Record::Vaccination(record)
    }
}
