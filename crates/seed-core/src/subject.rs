//! Subjects (pets) and their owners.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a subject in the registry.
pub type SubjectId = u64;

/// Identifier of an owner (application user).
pub type OwnerId = u64;

/// Application user that owns subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub username: String,
}

/// A pet that health data is generated for.
///
/// Subjects are owned by the registry. The generator only ever receives
/// them from `get` / `get_or_create`, it never builds one itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub owner_id: OwnerId,
    pub name: String,
    pub species: String,
    /// Baseline weight in kilograms.
    pub base_weight: f64,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub color: String,
    pub medical_conditions: String,
    pub microchip_number: String,
}

impl Subject {
    /// Build a subject from registry defaults.
    pub fn from_defaults(id: SubjectId, defaults: SubjectDefaults) -> Self {
        Self {
            id,
            owner_id: defaults.owner_id,
            name: defaults.name,
            species: defaults.species,
            base_weight: defaults.base_weight,
            date_of_birth: defaults.date_of_birth,
            gender: defaults.gender,
            color: defaults.color,
            medical_conditions: defaults.medical_conditions,
            microchip_number: defaults.microchip_number,
        }
    }

    /// Baseline body length in centimeters, derived from the baseline weight.
    ///
    /// Larger cats are longer: 48 cm at 2.5 kg, plus 3 cm per extra kilogram.
    pub fn base_length(&self) -> f64 {
        48.0 + (self.base_weight - 2.5) * 3.0
    }
}

/// Field values used when `get_or_create` has to insert a new subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectDefaults {
    pub owner_id: OwnerId,
    pub name: String,
    pub species: String,
    pub base_weight: f64,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub color: String,
    pub medical_conditions: String,
    pub microchip_number: String,
}
