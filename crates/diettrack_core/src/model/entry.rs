//! Diet entry domain model.
//!
//! # Responsibility
//! - Define the one-day observation persisted by the record store.
//! - Check entry invariants before an entry is written.
//!
//! # Invariants
//! - `date` is kept exactly as entered and compared byte-for-byte.
//! - Every numeric field is finite and > 0 for a valid entry.
//! - `activity_level` is within `1..=5`; `age`, when present, within `1..=120`.

use crate::validate::{self, ACTIVITY_LEVEL_MAX, ACTIVITY_LEVEL_MIN, AGE_MAX};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ordered entries as stored; insertion order is entry order.
pub type RecordSet = Vec<DietEntry>;

/// One day of recorded intake, activity and body weight.
///
/// Field names double as the JSON keys of the storage file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietEntry {
    /// `MM/DD/YYYY`, stored as typed by the user.
    pub date: String,
    /// Self-reported exertion, 1 (sedentary) to 5 (very active).
    pub activity_level: u8,
    /// Energy intake in kcal.
    pub calories: f64,
    /// Grams.
    pub protein: f64,
    /// Grams.
    pub carbs: f64,
    /// Grams.
    pub fat: f64,
    /// Body weight in kg.
    pub weight: f64,
    /// Only written when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl DietEntry {
    /// Checks all entry invariants.
    ///
    /// # Errors
    /// - Returns the first violated invariant, checking fields in storage order.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if validate::validate_date(&self.date).is_err() {
            return Err(EntryValidationError::InvalidDate(self.date.clone()));
        }
        if !validate::is_valid_activity_level(self.activity_level) {
            return Err(EntryValidationError::ActivityLevelOutOfRange(
                self.activity_level,
            ));
        }
        for (field, value) in self.numeric_fields() {
            if !validate::is_positive_finite(value) {
                return Err(EntryValidationError::NotPositive { field, value });
            }
        }
        if let Some(age) = self.age {
            if !validate::is_valid_age(age) {
                return Err(EntryValidationError::AgeOutOfRange(age));
            }
        }
        Ok(())
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("weight", self.weight),
        ]
    }
}

/// Entry invariant violation.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    InvalidDate(String),
    ActivityLevelOutOfRange(u8),
    NotPositive { field: &'static str, value: f64 },
    AgeOutOfRange(u32),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(date) => {
                write!(f, "date `{date}` is not a valid MM/DD/YYYY calendar date")
            }
            Self::ActivityLevelOutOfRange(level) => write!(
                f,
                "activity_level {level} is outside {ACTIVITY_LEVEL_MIN}..={ACTIVITY_LEVEL_MAX}"
            ),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be a finite number > 0, got {value}")
            }
            Self::AgeOutOfRange(age) => write!(f, "age {age} is outside 1..={AGE_MAX}"),
        }
    }
}

impl Error for EntryValidationError {}
