//! Core domain logic for the diet tracker.
//! This crate is the single source of truth for entry invariants, storage
//! format and the feedback/prediction arithmetic.

pub mod analysis;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use analysis::estimator::{Estimator, EstimatorError, LinearModel, LinearRegression};
pub use analysis::feedback::{compute_feedback, Advisory, FeedbackReport};
pub use analysis::plan::{
    generate_meal_plan, recommend_weight_loss_plan, MacroTargets, Meal, MealPlan, PlanError,
    WeightGoal, WeightLossPlan,
};
pub use analysis::predictor::{
    predict_weight, training_set, FeatureSet, PlannedIntake, PredictError,
    MIN_ENTRIES_FOR_PREDICTION,
};
pub use analysis::{InsufficientDataError, Macronutrient};
pub use config::{ConfigError, TrackerConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{DietEntry, EntryValidationError, RecordSet};
pub use repo::entry_store::{EntryStore, JsonEntryStore, StoreError, StoreResult};
pub use service::tracker_service::{ServiceError, ServiceResult, TrackerService};
pub use validate::{
    validate_activity_level, validate_age, validate_date, validate_positive_number,
    InputValidationError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
