//! Completed doses and their annual boosters.

use crate::random::RandomSource;
use chrono::{Days, NaiveDate};
use seed_core::{DateRange, SubjectId, VaccinationRecord};
use std::fmt;

/// Whether a vaccine is recommended for every cat or only some.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Core,
    NonCore,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Core => f.write_str("Core"),
            Tier::NonCore => f.write_str("Non-core"),
        }
    }
}

/// One vaccine type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaccineDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub tier: Tier,
    pub interval_days: u64,
}

/// Standard feline vaccines.
pub const STANDARD_VACCINES: [VaccineDefinition; 4] = [
    VaccineDefinition {
        code: "FVRCP",
        name: "Feline Viral Rhinotracheitis, Calicivirus, Panleukopenia",
        tier: Tier::Core,
        interval_days: 365,
    },
    VaccineDefinition {
        code: "Rabies",
        name: "Rabies Vaccine",
        tier: Tier::Core,
        interval_days: 365,
    },
    VaccineDefinition {
        code: "FeLV",
        name: "Feline Leukemia Virus",
        tier: Tier::NonCore,
        interval_days: 365,
    },
    VaccineDefinition {
        code: "FIV",
        name: "Feline Immunodeficiency Virus",
        tier: Tier::NonCore,
        interval_days: 365,
    },
];

/// Generates one completed dose per vaccine and, when it fits in the range,
/// the pending booster one interval later.
#[derive(Debug, Clone)]
pub struct VaccinationScheduler {
    vaccines: Vec<VaccineDefinition>,
    /// Days after the range start the completed dose falls in, inclusive
    first_dose_window: (u64, u64),
}

impl VaccinationScheduler {
    pub fn new(vaccines: impl IntoIterator<Item = VaccineDefinition>) -> Self {
        Self {
            vaccines: vaccines.into_iter().collect(),
            first_dose_window: (30, 180),
        }
    }

    /// Change the window of days after the start the completed dose is drawn from.
    pub fn with_first_dose_window(mut self, earliest: u64, latest: u64) -> Self {
        self.first_dose_window = (earliest.min(latest), earliest.max(latest));
        self
    }

    pub fn vaccines(&self) -> &[VaccineDefinition] {
        &self.vaccines
    }

    /// Build the vaccination records for a subject.
    ///
    /// Records come in vaccine order, each completed dose followed by its
    /// booster if there is one. A booster past the end of the range is
    /// omitted, never moved earlier.
    pub fn schedule(
        &self,
        subject_id: SubjectId,
        range: &DateRange,
        rng: &mut RandomSource,
    ) -> Vec<VaccinationRecord> {
        let (earliest, latest) = self.first_dose_window;
        let mut records = Vec::with_capacity(self.vaccines.len() * 2);

        for vaccine in &self.vaccines {
            let offset = rng.int_range(earliest as i64, latest as i64) as u64;
            let Some(given) = range.start().checked_add_days(Days::new(offset)) else {
                continue;
            };

            records.push(VaccinationRecord::completed(
                subject_id,
                vaccine.name,
                given,
                None,
                format!(
                    "{} vaccination - {} completed successfully. Next due in 12 months.",
                    vaccine.tier, vaccine.code
                ),
            ));

            if let Some(due) = booster_date(given, vaccine.interval_days, range.end()) {
                records.push(VaccinationRecord::pending(
                    subject_id,
                    format!("{} (Annual Booster)", vaccine.name),
                    due,
                    format!(
                        "Annual booster for {} - {} vaccination due for renewal.",
                        vaccine.code, vaccine.tier
                    ),
                ));
            }
        }

        records
    }
}

impl Default for VaccinationScheduler {
    fn default() -> Self {
        Self::new(STANDARD_VACCINES)
    }
}

/// `given + interval` if that is on or before `end`.
fn booster_date(given: NaiveDate, interval_days: u64, end: NaiveDate) -> Option<NaiveDate> {
    given
        .checked_add_days(Days::new(interval_days))
        .filter(|due| *due <= end)
}
