//! Tracker use-case service.
//!
//! # Responsibility
//! - Provide one entry point per menu operation.
//! - Reload the record set from the injected store on every call.
//!
//! # Invariants
//! - Service APIs never bypass store validation/persistence contracts.
//! - No record state is held between calls; the store is the source of truth.

use crate::analysis::estimator::{Estimator, LinearRegression};
use crate::analysis::feedback::{compute_feedback, FeedbackReport};
use crate::analysis::plan::{
    generate_meal_plan, recommend_weight_loss_plan, MacroTargets, MealPlan, PlanError, WeightGoal,
    WeightLossPlan,
};
use crate::analysis::predictor::{predict_weight, FeatureSet, PlannedIntake, PredictError};
use crate::analysis::InsufficientDataError;
use crate::model::entry::{DietEntry, RecordSet};
use crate::repo::entry_store::{EntryStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for tracker use-cases.
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Feedback(InsufficientDataError),
    Predict(PredictError),
    Plan(PlanError),
}

impl ServiceError {
    /// Whether the failure only means "record more data first".
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Self::Feedback(_)
                | Self::Predict(PredictError::InsufficientData(_))
                | Self::Plan(PlanError::InsufficientData(_))
        )
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Feedback(err) => write!(f, "{err}"),
            Self::Predict(err) => write!(f, "{err}"),
            Self::Plan(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Feedback(err) => Some(err),
            Self::Predict(err) => Some(err),
            Self::Plan(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PredictError> for ServiceError {
    fn from(value: PredictError) -> Self {
        Self::Predict(value)
    }
}

impl From<PlanError> for ServiceError {
    fn from(value: PlanError) -> Self {
        Self::Plan(value)
    }
}

/// Use-case service over an injected entry store.
pub struct TrackerService<S: EntryStore> {
    store: S,
    feature_set: FeatureSet,
}

impl<S: EntryStore> TrackerService<S> {
    /// Creates a service using the provided store and predictor feature set.
    pub fn new(store: S, feature_set: FeatureSet) -> Self {
        Self { store, feature_set }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.feature_set
    }

    /// Validates and appends one entry; returns the stored entry count.
    pub fn record_entry(&self, entry: &DietEntry) -> ServiceResult<usize> {
        Ok(self.store.append(entry)?)
    }

    /// Lists stored entries in insertion order.
    pub fn list_entries(&self) -> ServiceResult<RecordSet> {
        Ok(self.store.load()?)
    }

    /// Deletes the first entry with exactly this date string.
    ///
    /// Returns `false` when no entry matched; that is not an error.
    pub fn delete_entry(&self, date: &str) -> ServiceResult<bool> {
        Ok(self.store.delete_by_date(date)?)
    }

    /// Macronutrient feedback over every stored entry.
    pub fn feedback(&self) -> ServiceResult<FeedbackReport> {
        let entries = self.store.load()?;
        compute_feedback(&entries).map_err(ServiceError::Feedback)
    }

    /// Predicts weight for `intake` with the reference least-squares estimator.
    pub fn predict_weight(&self, intake: &PlannedIntake) -> ServiceResult<f64> {
        let mut estimator = LinearRegression::new();
        self.predict_weight_with(intake, &mut estimator)
    }

    /// Predicts weight for `intake` with a caller-supplied estimator.
    pub fn predict_weight_with<E>(&self, intake: &PlannedIntake, estimator: &mut E) -> ServiceResult<f64>
    where
        E: Estimator + ?Sized,
    {
        let entries = self.store.load()?;
        let features = intake.features(self.feature_set);
        Ok(predict_weight(
            &entries,
            &features,
            self.feature_set,
            estimator,
        )?)
    }

    /// Weight-loss plan trained on the stored history.
    pub fn weight_loss_plan(&self, goal: &WeightGoal) -> ServiceResult<WeightLossPlan> {
        let history = self.store.load()?;
        Ok(recommend_weight_loss_plan(&history, goal)?)
    }

    /// Splits daily targets into meals; does not touch the store.
    pub fn meal_plan(&self, targets: &MacroTargets) -> ServiceResult<MealPlan> {
        Ok(generate_meal_plan(targets)?)
    }
}
