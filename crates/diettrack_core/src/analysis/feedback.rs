//! Macronutrient feedback over the full record set.
//!
//! # Invariants
//! - Percentages use `grams * kcal_per_gram * 100 / total_calories`, in that order.
//! - A percentage equal to a range bound is in range.
//! - Rounding to two decimals happens only when rendering.

use crate::analysis::{InsufficientDataError, Macronutrient};
use crate::model::entry::DietEntry;

/// Percentage-of-calories breakdown and advisories for a record set.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackReport {
    pub entry_count: usize,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub protein_percent: f64,
    pub carbs_percent: f64,
    pub fat_percent: f64,
    pub average_calories_per_day: f64,
    /// One item per macronutrient outside its healthy range, in
    /// protein, carbohydrate, fat order.
    pub advisories: Vec<Advisory>,
}

/// A macronutrient whose share of calories is outside its healthy range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advisory {
    pub macronutrient: Macronutrient,
    pub percent: f64,
}

impl Advisory {
    pub fn message(&self) -> String {
        format!(
            "Consider adjusting your {} intake to meet the recommended range.",
            self.macronutrient
        )
    }
}

impl FeedbackReport {
    /// Share of calories for one macronutrient, unrounded.
    pub fn percent_of(&self, macronutrient: Macronutrient) -> f64 {
        match macronutrient {
            Macronutrient::Protein => self.protein_percent,
            Macronutrient::Carbohydrate => self.carbs_percent,
            Macronutrient::Fat => self.fat_percent,
        }
    }

    /// Console lines: averages and percentages first, then advisories.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Average calories per day: {:.2}",
            self.average_calories_per_day
        )];
        for macronutrient in Macronutrient::ALL {
            let (low, high) = macronutrient.healthy_range();
            lines.push(format!(
                "{} intake: {:.2}% (Recommended: {low}-{high}%)",
                macronutrient.label(),
                self.percent_of(macronutrient)
            ));
        }
        lines.extend(self.advisories.iter().map(Advisory::message));
        lines
    }
}

/// Computes the feedback report for `entries`.
///
/// # Errors
/// - `NoEntries` when `entries` is empty.
/// - `ZeroCalories` when calories do not sum to a positive number.
pub fn compute_feedback(entries: &[DietEntry]) -> Result<FeedbackReport, InsufficientDataError> {
    if entries.is_empty() {
        return Err(InsufficientDataError::NoEntries);
    }

    let total_calories: f64 = entries.iter().map(|entry| entry.calories).sum();
    let total_protein: f64 = entries.iter().map(|entry| entry.protein).sum();
    let total_carbs: f64 = entries.iter().map(|entry| entry.carbs).sum();
    let total_fat: f64 = entries.iter().map(|entry| entry.fat).sum();

    // NaN sums only come from hand-edited files.
    if total_calories.is_nan() || total_calories <= 0.0 {
        return Err(InsufficientDataError::ZeroCalories);
    }

    let share = |grams: f64, macronutrient: Macronutrient| {
        grams * macronutrient.kcal_per_gram() * 100.0 / total_calories
    };
    let protein_percent = share(total_protein, Macronutrient::Protein);
    let carbs_percent = share(total_carbs, Macronutrient::Carbohydrate);
    let fat_percent = share(total_fat, Macronutrient::Fat);

    let advisories = [
        (Macronutrient::Protein, protein_percent),
        (Macronutrient::Carbohydrate, carbs_percent),
        (Macronutrient::Fat, fat_percent),
    ]
    .into_iter()
    .filter(|&(macronutrient, percent)| {
        let (low, high) = macronutrient.healthy_range();
        percent < low || percent > high
    })
    .map(|(macronutrient, percent)| Advisory {
        macronutrient,
        percent,
    })
    .collect();

    Ok(FeedbackReport {
        entry_count: entries.len(),
        total_calories,
        total_protein,
        total_carbs,
        total_fat,
        protein_percent,
        carbs_percent,
        fat_percent,
        average_calories_per_day: total_calories / entries.len() as f64,
        advisories,
    })
}
