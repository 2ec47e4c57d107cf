//! Pluggable regression estimators.
//!
//! # Responsibility
//! - Define the `fit`/`predict` capability the weight predictor depends on.
//! - Provide ordinary least squares as the reference estimator.
//!
//! # Invariants
//! - `predict` before a successful `fit` fails with `NotFitted`.
//! - Rank-deficient fits return the minimum-norm least-squares solution, so
//!   every feature column contributes to the prediction.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Estimator failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimatorError {
    NotFitted,
    EmptyTrainingSet,
    /// Rows of differing width, or a target count that differs from the row count.
    ShapeMismatch {
        expected: usize,
        found: usize,
    },
    NonFiniteValue,
}

impl Display for EstimatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFitted => write!(f, "estimator has not been fitted"),
            Self::EmptyTrainingSet => write!(f, "training set is empty"),
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {expected} values, found {found}")
            }
            Self::NonFiniteValue => write!(f, "training or input data is not finite"),
        }
    }
}

impl Error for EstimatorError {}

/// Regression capability: learn `features -> targets`, then score one row.
pub trait Estimator {
    /// Fits the model; `features` holds one row per target.
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<(), EstimatorError>;

    /// Predicts one scalar for a row shaped like the training rows.
    fn predict(&self, row: &[f64]) -> Result<f64, EstimatorError>;
}

/// Fitted linear model in original feature units.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Array1<f64>,
}

impl LinearModel {
    fn evaluate(&self, row: &[f64]) -> f64 {
        self.intercept + self.coefficients.dot(&ArrayView1::from(row))
    }
}

/// Ordinary least squares with an intercept term.
///
/// Features and targets are centered, then solved through an SVD
/// pseudo-inverse. Singular values below `max(rows, cols) * eps * s_max`
/// are dropped, which gives the minimum-norm solution for
/// under-determined histories (e.g. two entries, five features).
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    model: Option<LinearModel>,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fitted model, if any.
    pub fn model(&self) -> Option<&LinearModel> {
        self.model.as_ref()
    }
}

impl Estimator for LinearRegression {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<(), EstimatorError> {
        self.model = None;
        let (matrix, targets) = training_arrays(features, targets)?;

        let feature_means = matrix
            .mean_axis(Axis(0))
            .ok_or(EstimatorError::EmptyTrainingSet)?;
        let target_mean = targets.mean().ok_or(EstimatorError::EmptyTrainingSet)?;
        let centered = &matrix - &feature_means;
        let centered_targets = &targets - target_mean;

        let coefficients = min_norm_least_squares(&centered, &centered_targets)?;
        let intercept = target_mean - coefficients.dot(&feature_means);

        if !intercept.is_finite() || coefficients.iter().any(|value| !value.is_finite()) {
            return Err(EstimatorError::NonFiniteValue);
        }

        self.model = Some(LinearModel {
            intercept,
            coefficients,
        });
        Ok(())
    }

    fn predict(&self, row: &[f64]) -> Result<f64, EstimatorError> {
        let model = self.model.as_ref().ok_or(EstimatorError::NotFitted)?;
        if row.len() != model.coefficients.len() {
            return Err(EstimatorError::ShapeMismatch {
                expected: model.coefficients.len(),
                found: row.len(),
            });
        }
        if row.iter().any(|value| !value.is_finite()) {
            return Err(EstimatorError::NonFiniteValue);
        }
        let prediction = model.evaluate(row);
        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(EstimatorError::NonFiniteValue)
        }
    }
}

/// Checks the training set and packs it into `ndarray` form.
fn training_arrays(
    features: &[Vec<f64>],
    targets: &[f64],
) -> Result<(Array2<f64>, Array1<f64>), EstimatorError> {
    let Some(first) = features.first() else {
        return Err(EstimatorError::EmptyTrainingSet);
    };
    if targets.len() != features.len() {
        return Err(EstimatorError::ShapeMismatch {
            expected: features.len(),
            found: targets.len(),
        });
    }
    let width = first.len();
    if let Some(row) = features.iter().find(|row| row.len() != width) {
        return Err(EstimatorError::ShapeMismatch {
            expected: width,
            found: row.len(),
        });
    }
    let all_finite = features
        .iter()
        .flatten()
        .chain(targets)
        .all(|value| value.is_finite());
    if !all_finite {
        return Err(EstimatorError::NonFiniteValue);
    }

    let flat: Vec<f64> = features.iter().flatten().copied().collect();
    let matrix = Array2::from_shape_vec((features.len(), width), flat).map_err(|_| {
        EstimatorError::ShapeMismatch {
            expected: features.len() * width,
            found: features.iter().map(Vec::len).sum(),
        }
    })?;
    Ok((matrix, Array1::from(targets.to_vec())))
}

/// Minimum-norm solution of `matrix * x = targets` via SVD.
fn min_norm_least_squares(
    matrix: &Array2<f64>,
    targets: &Array1<f64>,
) -> Result<Array1<f64>, EstimatorError> {
    let (rows, cols) = matrix.dim();
    if cols == 0 {
        return Ok(Array1::zeros(0));
    }

    let design = DMatrix::from_fn(rows, cols, |row, col| matrix[[row, col]]);
    let rhs = DVector::from_iterator(rows, targets.iter().copied());
    let svd = design.svd(true, true);
    let cutoff = svd.singular_values.max() * rows.max(cols) as f64 * f64::EPSILON;
    let solution = svd
        .solve(&rhs, cutoff)
        .map_err(|_| EstimatorError::NonFiniteValue)?;
    Ok(solution.iter().copied().collect())
}
