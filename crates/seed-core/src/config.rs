//! Run configuration loaded from YAML.
//!
//! A configuration names the calendar window, the local timezone that
//! measurement timestamps are attached to, the owners the registry starts
//! with, and the subjects to seed. [`SeedConfig::default`] reproduces the
//! stock two-cat data set.

use crate::range::{DateRange, InvalidRange};
use crate::subject::{Owner, OwnerId, SubjectDefaults, SubjectId};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Start and end dates are out of order
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    /// Timezone name is not a known IANA zone
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// A configured value is out of bounds
    #[error("Invalid value for subject {subject}: {reason}")]
    InvalidSubject { subject: SubjectId, reason: String },

    /// The same subject id appears twice
    #[error("Duplicate subject id: {0}")]
    DuplicateSubject(SubjectId),
}

/// Top-level configuration of a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedConfig {
    /// First day of generated data
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last day of generated data (inclusive)
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,

    /// IANA timezone for `measured_at` timestamps
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Base seed; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Owners present in a freshly created registry
    #[serde(default = "default_owners")]
    pub owners: Vec<OwnerConfig>,

    /// Subjects to seed
    #[serde(default = "default_subjects")]
    pub subjects: Vec<SubjectConfig>,
}

/// Owner entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnerConfig {
    pub id: OwnerId,
    pub username: String,
}

impl From<&OwnerConfig> for Owner {
    fn from(config: &OwnerConfig) -> Self {
        Owner {
            id: config.id,
            username: config.username.clone(),
        }
    }
}

/// Subject entry, used as the `get_or_create` defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectConfig {
    pub id: SubjectId,
    pub name: String,
    /// Baseline weight in kilograms
    pub base_weight: f64,
    #[serde(default = "default_species")]
    pub species: String,
    #[serde(default = "default_date_of_birth")]
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub color: String,
    #[serde(default = "default_medical_conditions")]
    pub medical_conditions: String,
    pub microchip: String,
}

impl SubjectConfig {
    /// Registry defaults for this subject under the given owner.
    pub fn defaults(&self, owner_id: OwnerId) -> SubjectDefaults {
        SubjectDefaults {
            owner_id,
            name: self.name.clone(),
            species: self.species.clone(),
            base_weight: self.base_weight,
            date_of_birth: self.date_of_birth,
            gender: self.gender.clone(),
            color: self.color.clone(),
            medical_conditions: self.medical_conditions.clone(),
            microchip_number: self.microchip.clone(),
        }
    }
}

impl SeedConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SeedConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges, timezone and subject values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range()?;
        self.tz()?;

        let mut seen = HashSet::new();
        for subject in &self.subjects {
            if !seen.insert(subject.id) {
                return Err(ConfigError::DuplicateSubject(subject.id));
            }
            if !(subject.base_weight.is_finite() && subject.base_weight > 0.0) {
                return Err(ConfigError::InvalidSubject {
                    subject: subject.id,
                    reason: format!("base_weight must be positive, got {}", subject.base_weight),
                });
            }
        }
        Ok(())
    }

    /// The configured calendar window.
    pub fn range(&self) -> Result<DateRange, InvalidRange> {
        DateRange::new(self.start_date, self.end_date)
    }

    /// The configured local timezone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }

    /// Look up a subject entry by id.
    pub fn subject(&self, id: SubjectId) -> Option<&SubjectConfig> {
        self.subjects.iter().find(|s| s.id == id)
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            end_date: default_end_date(),
            timezone: default_timezone(),
            seed: None,
            owners: default_owners(),
            subjects: default_subjects(),
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 28).unwrap_or_default()
}

fn default_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, 15).unwrap_or_default()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_species() -> String {
    "Cat".to_string()
}

fn default_medical_conditions() -> String {
    "None".to_string()
}

fn default_owners() -> Vec<OwnerConfig> {
    vec![OwnerConfig {
        id: 1,
        username: "admin".to_string(),
    }]
}

fn default_subjects() -> Vec<SubjectConfig> {
    vec![
        SubjectConfig {
            id: 3,
            name: "Milk".to_string(),
            base_weight: 2.6,
            species: default_species(),
            date_of_birth: default_date_of_birth(),
            gender: "Female".to_string(),
            color: "White with Gray patches".to_string(),
            medical_conditions: default_medical_conditions(),
            microchip: "CAT000001".to_string(),
        },
        SubjectConfig {
            id: 2,
            name: "Butter".to_string(),
            base_weight: 3.8,
            species: default_species(),
            date_of_birth: default_date_of_birth(),
            gender: "Male".to_string(),
            color: "Golden Tabby".to_string(),
            medical_conditions: default_medical_conditions(),
            microchip: "CAT000002".to_string(),
        },
    ]
}
