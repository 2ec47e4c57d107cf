use diettrack_core::{
    generate_meal_plan, recommend_weight_loss_plan, DietEntry, InsufficientDataError,
    MacroTargets, Meal, PlanError, WeightGoal,
};

fn entry(calories: f64, activity_level: u8, weight: f64) -> DietEntry {
    DietEntry {
        date: "01/01/2024".to_string(),
        activity_level,
        calories,
        protein: 100.0,
        carbs: 250.0,
        fat: 70.0,
        weight,
        age: None,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn plan_uses_latest_weight_and_average_intake() {
    let history = [entry(2400.0, 2, 85.0), entry(2600.0, 3, 84.0)];
    let goal = WeightGoal {
        target_weight: 80.0,
        weeks: 10,
    };

    let plan = recommend_weight_loss_plan(&history, &goal).unwrap();

    assert_eq!(plan.current_weight, 84.0);
    assert_eq!(plan.maintenance_calories, 2500.0);
    // 4 kg * 7700 kcal over 70 days
    assert_close(plan.daily_deficit, 440.0);
    assert_close(plan.daily.calories, 2060.0);
    assert_close(plan.daily.protein, 2060.0 * 0.225 / 4.0);
    assert_close(plan.daily.carbs, 2060.0 * 0.55 / 4.0);
    assert_close(plan.daily.fat, 2060.0 * 0.275 / 9.0);
    assert!(!plan.clamped_to_minimum);
    // average 2.5 rounds to 3, plus one step while losing weight
    assert_eq!(plan.recommended_activity_level, 4);
}

#[test]
fn aggressive_goal_is_clamped_to_minimum_calories() {
    let history = [entry(1800.0, 5, 100.0)];
    let goal = WeightGoal {
        target_weight: 70.0,
        weeks: 4,
    };

    let plan = recommend_weight_loss_plan(&history, &goal).unwrap();

    assert!(plan.clamped_to_minimum);
    assert_eq!(plan.daily.calories, 1200.0);
    assert_eq!(plan.recommended_activity_level, 5);
    assert!(plan
        .render_lines()
        .iter()
        .any(|line| line.contains("1200 kcal minimum")));
}

#[test]
fn goal_above_current_weight_keeps_maintenance() {
    let history = [entry(2200.0, 2, 70.0)];
    let goal = WeightGoal {
        target_weight: 72.0,
        weeks: 8,
    };

    let plan = recommend_weight_loss_plan(&history, &goal).unwrap();
    assert_eq!(plan.daily_deficit, 0.0);
    assert_eq!(plan.daily.calories, 2200.0);
    assert_eq!(plan.recommended_activity_level, 2);
}

#[test]
fn plan_needs_history_and_a_sane_goal() {
    let goal = WeightGoal {
        target_weight: 75.0,
        weeks: 6,
    };
    assert_eq!(
        recommend_weight_loss_plan(&[], &goal).unwrap_err(),
        PlanError::InsufficientData(InsufficientDataError::NoEntries)
    );

    let history = [entry(2000.0, 3, 80.0)];
    let zero_weeks = WeightGoal {
        target_weight: 75.0,
        weeks: 0,
    };
    assert!(matches!(
        recommend_weight_loss_plan(&history, &zero_weeks),
        Err(PlanError::InvalidGoal(_))
    ));
    let negative = WeightGoal {
        target_weight: -1.0,
        weeks: 6,
    };
    assert!(matches!(
        recommend_weight_loss_plan(&history, &negative),
        Err(PlanError::InvalidGoal(_))
    ));
}

#[test]
fn meal_plan_splits_targets_by_meal_share() {
    let targets = MacroTargets {
        calories: 2000.0,
        protein: 120.0,
        carbs: 240.0,
        fat: 60.0,
    };

    let plan = generate_meal_plan(&targets).unwrap();

    let order: Vec<Meal> = plan.meals.iter().map(|(meal, _)| *meal).collect();
    assert_eq!(order, Meal::ALL.to_vec());

    let lunch = plan.get(Meal::Lunch).unwrap();
    assert_close(lunch.calories, 700.0);
    assert_close(lunch.protein, 42.0);
    assert_close(lunch.carbs, 84.0);
    assert_close(lunch.fat, 21.0);

    let total_calories: f64 = plan.meals.iter().map(|(_, meal)| meal.calories).sum();
    assert_close(total_calories, 2000.0);
}

#[test]
fn meal_plan_rejects_non_positive_targets() {
    let targets = MacroTargets {
        calories: 2000.0,
        protein: 0.0,
        carbs: 240.0,
        fat: 60.0,
    };
    let err = generate_meal_plan(&targets).unwrap_err();
    assert!(err.to_string().contains("protein"), "unexpected: {err}");
}
