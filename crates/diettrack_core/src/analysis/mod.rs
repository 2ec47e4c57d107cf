//! Derived views over a loaded record set.
//!
//! # Responsibility
//! - Turn stored entries into feedback, weight predictions and plans.
//! - Stay storage-agnostic: every function takes the record set as input.
//!
//! # Invariants
//! - Analyses are stateless; nothing is retained between calls.
//! - Missing data is reported through `InsufficientDataError`, never a panic.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod estimator;
pub mod feedback;
pub mod plan;
pub mod predictor;

/// Not enough recorded data for the requested analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficientDataError {
    /// The record set is empty.
    NoEntries,
    /// Calories sum to zero, so percentages are undefined.
    ZeroCalories,
    /// Fewer entries than the analysis needs.
    TooFewEntries { required: usize, available: usize },
}

impl Display for InsufficientDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEntries => write!(f, "insufficient data: no entries recorded"),
            Self::ZeroCalories => write!(f, "insufficient data: total calories are zero"),
            Self::TooFewEntries {
                required,
                available,
            } => write!(
                f,
                "insufficient data: need at least {required} entries, have {available}"
            ),
        }
    }
}

impl Error for InsufficientDataError {}

/// Macronutrient tracked per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macronutrient {
    Protein,
    Carbohydrate,
    Fat,
}

impl Macronutrient {
    pub const ALL: [Macronutrient; 3] = [Self::Protein, Self::Carbohydrate, Self::Fat];

    /// Energy per gram in kcal.
    pub fn kcal_per_gram(self) -> f64 {
        match self {
            Self::Protein | Self::Carbohydrate => 4.0,
            Self::Fat => 9.0,
        }
    }

    /// Healthy share of total calories, in percent, both bounds inclusive.
    pub fn healthy_range(self) -> (f64, f64) {
        match self {
            Self::Protein => (10.0, 35.0),
            Self::Carbohydrate => (45.0, 65.0),
            Self::Fat => (20.0, 35.0),
        }
    }

    /// Midpoint of `healthy_range`, used as a plan target.
    pub fn target_percent(self) -> f64 {
        let (low, high) = self.healthy_range();
        (low + high) / 2.0
    }

    /// Lowercase name used inside advisory sentences.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Carbohydrate => "carbohydrate",
            Self::Fat => "fat",
        }
    }

    /// Capitalized label used at the start of report lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Protein => "Protein",
            Self::Carbohydrate => "Carbohydrate",
            Self::Fat => "Fat",
        }
    }
}

impl Display for Macronutrient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
