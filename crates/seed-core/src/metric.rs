//! Health metric kinds, their units, cadences and categorical labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of tracked health metrics.
///
/// Every record the generator emits is tagged with exactly one of these.
/// Units and cadences are pure functions of the kind, so a record never
/// relies on the persistence layer to infer them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    #[serde(rename = "Weight")]
    Weight,
    #[serde(rename = "Length")]
    Length,
    #[serde(rename = "Water Intake")]
    WaterIntake,
    #[serde(rename = "Activity Level")]
    ActivityLevel,
    #[serde(rename = "Bowel Movements")]
    BowelMovements,
    #[serde(rename = "Urination Frequency")]
    UrinationFrequency,
    #[serde(rename = "Mood")]
    Mood,
    #[serde(rename = "Coat Condition")]
    CoatCondition,
}

impl MetricKind {
    /// All metric kinds, in emission order within a day.
    pub const ALL: [MetricKind; 8] = [
        MetricKind::Weight,
        MetricKind::WaterIntake,
        MetricKind::ActivityLevel,
        MetricKind::BowelMovements,
        MetricKind::UrinationFrequency,
        MetricKind::Mood,
        MetricKind::CoatCondition,
        MetricKind::Length,
    ];

    /// Display name, as stored in the `attribute_name` column.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Weight => "Weight",
            MetricKind::Length => "Length",
            MetricKind::WaterIntake => "Water Intake",
            MetricKind::ActivityLevel => "Activity Level",
            MetricKind::BowelMovements => "Bowel Movements",
            MetricKind::UrinationFrequency => "Urination Frequency",
            MetricKind::Mood => "Mood",
            MetricKind::CoatCondition => "Coat Condition",
        }
    }

    /// Unit for quantitative metrics, `None` for categorical ones.
    pub fn unit(&self) -> Option<Unit> {
        match self {
            MetricKind::Weight => Some(Unit::Kilograms),
            MetricKind::Length => Some(Unit::Centimeters),
            MetricKind::WaterIntake => Some(Unit::Milliliters),
            MetricKind::ActivityLevel => Some(Unit::Minutes),
            MetricKind::BowelMovements | MetricKind::UrinationFrequency => Some(Unit::Times),
            MetricKind::Mood | MetricKind::CoatCondition => None,
        }
    }

    /// Whether the metric carries a label instead of a numeric value.
    pub fn is_categorical(&self) -> bool {
        self.unit().is_none()
    }

    /// How often the metric is measured.
    pub fn cadence(&self) -> Cadence {
        match self {
            MetricKind::CoatCondition => Cadence::EveryNDays(3),
            MetricKind::Length => Cadence::EveryNDays(7),
            _ => Cadence::Daily,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Measurement unit of a quantitative metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "minutes")]
    Minutes,
    #[serde(rename = "times")]
    Times,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kilograms => "kg",
            Unit::Centimeters => "cm",
            Unit::Milliliters => "ml",
            Unit::Minutes => "minutes",
            Unit::Times => "times",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day-offset rule deciding when a metric is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Due on every day of the range.
    Daily,
    /// Due when `offset % n == 0`; offset 0 is always due.
    EveryNDays(u32),
}

impl Cadence {
    /// Whether a metric with this cadence is due at the given day offset.
    pub fn is_due(&self, offset: u32) -> bool {
        match self {
            Cadence::Daily => true,
            Cadence::EveryNDays(n) => *n != 0 && offset % n == 0,
        }
    }
}

/// Observed mood of the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Normal,
    Lethargic,
    Hyperactive,
    Aggressive,
    Clingy,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Normal => "Normal",
            Mood::Lethargic => "Lethargic",
            Mood::Hyperactive => "Hyperactive",
            Mood::Aggressive => "Aggressive",
            Mood::Clingy => "Clingy",
        }
    }
}

/// Observed coat condition of the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoatCondition {
    Normal,
    Shedding,
    HairLoss,
    Dry,
    Dull,
}

impl CoatCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoatCondition::Normal => "Normal",
            CoatCondition::Shedding => "Shedding",
            CoatCondition::HairLoss => "Hair Loss",
            CoatCondition::Dry => "Dry",
            CoatCondition::Dull => "Dull",
        }
    }
}

/// Categorical label carried by Mood and Coat Condition records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Mood(Mood),
    Coat(CoatCondition),
}

impl Label {
    /// The metric this label belongs to.
    pub fn metric(&self) -> MetricKind {
        match self {
            Label::Mood(_) => MetricKind::Mood,
            Label::Coat(_) => MetricKind::CoatCondition,
        }
    }

    /// Parse a stored label for the given metric.
    ///
    /// Returns `None` for quantitative metrics and unknown labels. The metric
    /// is needed because "Normal" is valid for both categorical kinds.
    pub fn parse(metric: MetricKind, label: &str) -> Option<Label> {
        match metric {
            MetricKind::Mood => [
                Mood::Normal,
                Mood::Lethargic,
                Mood::Hyperactive,
                Mood::Aggressive,
                Mood::Clingy,
            ]
            .into_iter()
            .find(|m| m.as_str() == label)
            .map(Label::Mood),
            MetricKind::CoatCondition => [
                CoatCondition::Normal,
                CoatCondition::Shedding,
                CoatCondition::HairLoss,
                CoatCondition::Dry,
                CoatCondition::Dull,
            ]
            .into_iter()
            .find(|c| c.as_str() == label)
            .map(Label::Coat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Mood(mood) => mood.as_str(),
            Label::Coat(coat) => coat.as_str(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Mood> for Label {
    fn from(mood: Mood) -> Self {
        Label::Mood(mood)
    }
}

impl From<CoatCondition> for Label {
    fn from(coat: CoatCondition) -> Self {
        Label::Coat(coat)
    }
}
