//! Weight-loss and meal plan recommendations.
//!
//! # Responsibility
//! - Derive a daily calorie and macronutrient target from the user's history.
//! - Split daily targets across meals.
//!
//! # Invariants
//! - The weight-loss plan trains only on the `history` it is given.
//! - Daily calorie targets never go below `MIN_DAILY_CALORIES`.
//! - Macro targets sit at the midpoint of each healthy range.

use crate::analysis::{InsufficientDataError, Macronutrient};
use crate::model::entry::DietEntry;
use crate::validate::{ACTIVITY_LEVEL_MAX, ACTIVITY_LEVEL_MIN};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Approximate energy content of one kg of body fat.
pub const KCAL_PER_KG: f64 = 7700.0;
pub const MIN_DAILY_CALORIES: f64 = 1200.0;

/// Plan request failure.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    InsufficientData(InsufficientDataError),
    InvalidGoal(String),
}

impl Display for PlanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientData(err) => write!(f, "{err}"),
            Self::InvalidGoal(message) => write!(f, "invalid plan goal: {message}"),
        }
    }
}

impl Error for PlanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InsufficientData(err) => Some(err),
            Self::InvalidGoal(_) => None,
        }
    }
}

impl From<InsufficientDataError> for PlanError {
    fn from(value: InsufficientDataError) -> Self {
        Self::InsufficientData(value)
    }
}

/// Daily calorie and macronutrient amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroTargets {
    pub calories: f64,
    /// Grams.
    pub protein: f64,
    /// Grams.
    pub carbs: f64,
    /// Grams.
    pub fat: f64,
}

impl MacroTargets {
    /// Grams per macronutrient for `calories` at the healthy-range midpoints.
    pub fn balanced(calories: f64) -> Self {
        let grams = |macronutrient: Macronutrient| {
            calories * macronutrient.target_percent() / 100.0 / macronutrient.kcal_per_gram()
        };
        Self {
            calories,
            protein: grams(Macronutrient::Protein),
            carbs: grams(Macronutrient::Carbohydrate),
            fat: grams(Macronutrient::Fat),
        }
    }

    fn scaled(&self, share: f64) -> Self {
        Self {
            calories: self.calories * share,
            protein: self.protein * share,
            carbs: self.carbs * share,
            fat: self.fat * share,
        }
    }

    fn validate(&self) -> Result<(), PlanError> {
        let fields = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ];
        match fields.iter().find(|(_, value)| !(value.is_finite() && *value > 0.0)) {
            Some((name, value)) => Err(PlanError::InvalidGoal(format!(
                "{name} target must be > 0, got {value}"
            ))),
            None => Ok(()),
        }
    }
}

/// Target weight and time frame for a weight-loss plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightGoal {
    /// kg.
    pub target_weight: f64,
    pub weeks: u32,
}

/// Recommended daily regime to reach a `WeightGoal`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightLossPlan {
    /// Weight of the most recent entry.
    pub current_weight: f64,
    pub target_weight: f64,
    pub weeks: u32,
    /// Average daily intake over the history, used as maintenance estimate.
    pub maintenance_calories: f64,
    pub daily_deficit: f64,
    pub daily: MacroTargets,
    /// Set when the deficit was cut short by `MIN_DAILY_CALORIES`.
    pub clamped_to_minimum: bool,
    pub recommended_activity_level: u8,
}

impl WeightLossPlan {
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Current weight: {:.2} kg", self.current_weight),
            format!(
                "Target weight: {:.2} kg in {} weeks",
                self.target_weight, self.weeks
            ),
            format!("Maintenance calories: {:.2}", self.maintenance_calories),
            format!("Daily calorie deficit: {:.2}", self.daily_deficit),
            format!("Daily calories: {:.2}", self.daily.calories),
            format!("Protein: {:.2} g", self.daily.protein),
            format!("Carbohydrates: {:.2} g", self.daily.carbs),
            format!("Fat: {:.2} g", self.daily.fat),
            format!("Activity level: {}", self.recommended_activity_level),
        ];
        if self.clamped_to_minimum {
            lines.push(format!(
                "Calories held at the {MIN_DAILY_CALORIES:.0} kcal minimum; consider a longer time frame."
            ));
        }
        lines
    }
}

/// Recommends a daily regime from the user's own history.
///
/// `history` is the only training source: the latest entry gives the current
/// weight, the average intake gives the maintenance estimate.
///
/// # Errors
/// - `InsufficientData` when `history` is empty.
/// - `InvalidGoal` when the target weight is not positive or `weeks` is zero.
pub fn recommend_weight_loss_plan(
    history: &[DietEntry],
    goal: &WeightGoal,
) -> Result<WeightLossPlan, PlanError> {
    if !(goal.target_weight.is_finite() && goal.target_weight > 0.0) {
        return Err(PlanError::InvalidGoal(format!(
            "target weight must be > 0, got {}",
            goal.target_weight
        )));
    }
    if goal.weeks == 0 {
        return Err(PlanError::InvalidGoal(
            "time frame must be at least one week".to_string(),
        ));
    }
    let Some(latest) = history.last() else {
        return Err(InsufficientDataError::NoEntries.into());
    };

    let count = history.len() as f64;
    let maintenance_calories = history.iter().map(|entry| entry.calories).sum::<f64>() / count;
    let average_activity =
        history.iter().map(|entry| f64::from(entry.activity_level)).sum::<f64>() / count;

    let excess_weight = (latest.weight - goal.target_weight).max(0.0);
    let days = f64::from(goal.weeks) * 7.0;
    let daily_deficit = excess_weight * KCAL_PER_KG / days;
    let planned_calories = maintenance_calories - daily_deficit;
    let clamped_to_minimum = planned_calories < MIN_DAILY_CALORIES;
    let daily_calories = planned_calories.max(MIN_DAILY_CALORIES);

    let baseline_activity = average_activity
        .round()
        .clamp(f64::from(ACTIVITY_LEVEL_MIN), f64::from(ACTIVITY_LEVEL_MAX))
        as u8;
    let recommended_activity_level = if excess_weight > 0.0 {
        (baseline_activity + 1).min(ACTIVITY_LEVEL_MAX)
    } else {
        baseline_activity
    };

    Ok(WeightLossPlan {
        current_weight: latest.weight,
        target_weight: goal.target_weight,
        weeks: goal.weeks,
        maintenance_calories,
        daily_deficit,
        daily: MacroTargets::balanced(daily_calories),
        clamped_to_minimum,
        recommended_activity_level,
    })
}

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Fraction of the daily targets served by this meal.
    pub fn share(self) -> f64 {
        match self {
            Self::Breakfast => 0.25,
            Self::Lunch => 0.35,
            Self::Dinner => 0.30,
            Self::Snack => 0.10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

/// Daily targets split per meal, in `Meal::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlan {
    pub meals: Vec<(Meal, MacroTargets)>,
}

impl MealPlan {
    pub fn get(&self, meal: Meal) -> Option<&MacroTargets> {
        self.meals
            .iter()
            .find(|(slot, _)| *slot == meal)
            .map(|(_, targets)| targets)
    }
}

/// Splits daily `targets` across breakfast, lunch, dinner and a snack.
///
/// # Errors
/// - `InvalidGoal` when any target is not a finite number > 0.
pub fn generate_meal_plan(targets: &MacroTargets) -> Result<MealPlan, PlanError> {
    targets.validate()?;
    let meals = Meal::ALL
        .into_iter()
        .map(|meal| (meal, targets.scaled(meal.share())))
        .collect();
    Ok(MealPlan { meals })
}
