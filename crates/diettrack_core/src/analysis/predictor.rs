//! Weight prediction from recorded intake.
//!
//! # Responsibility
//! - Build the feature matrix and weight targets from a record set.
//! - Fit a caller-supplied estimator and score one planned day.
//!
//! # Invariants
//! - Rows follow record-set order, one row per entry.
//! - At least `MIN_ENTRIES_FOR_PREDICTION` entries are required.

use crate::analysis::estimator::{Estimator, EstimatorError};
use crate::analysis::InsufficientDataError;
use crate::model::entry::DietEntry;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_ENTRIES_FOR_PREDICTION: usize = 2;

/// Columns fed to the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureSet {
    /// `[calories, protein, carbs, fat]`.
    Macros,
    /// `[calories, protein, carbs, fat, activity_level]`.
    #[default]
    MacrosWithActivity,
}

impl FeatureSet {
    pub fn width(self) -> usize {
        self.column_names().len()
    }

    pub fn column_names(self) -> &'static [&'static str] {
        match self {
            Self::Macros => &["calories", "protein", "carbs", "fat"],
            Self::MacrosWithActivity => &["calories", "protein", "carbs", "fat", "activity_level"],
        }
    }

    /// Feature row for a stored entry.
    pub fn entry_row(self, entry: &DietEntry) -> Vec<f64> {
        self.row(
            entry.calories,
            entry.protein,
            entry.carbs,
            entry.fat,
            entry.activity_level,
        )
    }

    fn row(self, calories: f64, protein: f64, carbs: f64, fat: f64, activity_level: u8) -> Vec<f64> {
        let mut row = vec![calories, protein, carbs, fat];
        if self == Self::MacrosWithActivity {
            row.push(f64::from(activity_level));
        }
        row
    }
}

/// A planned day of intake to predict weight for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedIntake {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub activity_level: u8,
}

impl PlannedIntake {
    pub fn features(&self, feature_set: FeatureSet) -> Vec<f64> {
        feature_set.row(
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.activity_level,
        )
    }
}

/// Weight prediction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    InsufficientData(InsufficientDataError),
    FeatureCount { expected: usize, found: usize },
    Estimator(EstimatorError),
}

impl Display for PredictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientData(err) => write!(f, "{err}"),
            Self::FeatureCount { expected, found } => {
                write!(f, "expected {expected} feature values, got {found}")
            }
            Self::Estimator(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PredictError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InsufficientData(err) => Some(err),
            Self::Estimator(err) => Some(err),
            Self::FeatureCount { .. } => None,
        }
    }
}

impl From<InsufficientDataError> for PredictError {
    fn from(value: InsufficientDataError) -> Self {
        Self::InsufficientData(value)
    }
}

impl From<EstimatorError> for PredictError {
    fn from(value: EstimatorError) -> Self {
        Self::Estimator(value)
    }
}

/// Splits entries into a feature matrix and weight targets.
pub fn training_set(entries: &[DietEntry], feature_set: FeatureSet) -> (Vec<Vec<f64>>, Vec<f64>) {
    entries
        .iter()
        .map(|entry| (feature_set.entry_row(entry), entry.weight))
        .unzip()
}

/// Fits `estimator` on `entries` and predicts weight for `features`.
///
/// # Errors
/// - `InsufficientData` with fewer than two entries.
/// - `FeatureCount` when `features` does not match `feature_set`.
/// - `Estimator` when fitting or scoring fails.
pub fn predict_weight<E>(
    entries: &[DietEntry],
    features: &[f64],
    feature_set: FeatureSet,
    estimator: &mut E,
) -> Result<f64, PredictError>
where
    E: Estimator + ?Sized,
{
    if entries.len() < MIN_ENTRIES_FOR_PREDICTION {
        return Err(InsufficientDataError::TooFewEntries {
            required: MIN_ENTRIES_FOR_PREDICTION,
            available: entries.len(),
        }
        .into());
    }
    if features.len() != feature_set.width() {
        return Err(PredictError::FeatureCount {
            expected: feature_set.width(),
            found: features.len(),
        });
    }

    let (matrix, targets) = training_set(entries, feature_set);
    estimator.fit(&matrix, &targets)?;
    let weight = estimator.predict(features)?;
    info!(
        "event=weight_predict module=analysis status=ok entries={} features={}",
        entries.len(),
        feature_set.width()
    );
    Ok(weight)
}
