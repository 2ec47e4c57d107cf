use diettrack_core::{DietEntry, EntryValidationError};

fn sample_entry() -> DietEntry {
    DietEntry {
        date: "01/01/2024".to_string(),
        activity_level: 3,
        calories: 2000.0,
        protein: 100.0,
        carbs: 250.0,
        fat: 70.0,
        weight: 80.0,
        age: None,
    }
}

#[test]
fn serialization_uses_storage_keys_and_omits_missing_age() {
    let json = serde_json::to_value(sample_entry()).unwrap();
    assert_eq!(json["date"], "01/01/2024");
    assert_eq!(json["activity_level"], 3);
    assert_eq!(json["calories"], 2000.0);
    assert_eq!(json["protein"], 100.0);
    assert_eq!(json["carbs"], 250.0);
    assert_eq!(json["fat"], 70.0);
    assert_eq!(json["weight"], 80.0);
    assert!(json.get("age").is_none());

    let mut with_age = sample_entry();
    with_age.age = Some(34);
    let json = serde_json::to_value(&with_age).unwrap();
    assert_eq!(json["age"], 34);
}

#[test]
fn deserializes_integer_calories_from_older_files() {
    let value = serde_json::json!({
        "date": "3/7/2024",
        "calories": 1850,
        "protein": 90.5,
        "carbs": 210,
        "fat": 60,
        "weight": 77.3,
        "activity_level": 2
    });

    let entry: DietEntry = serde_json::from_value(value).unwrap();
    assert_eq!(entry.date, "3/7/2024");
    assert_eq!(entry.calories, 1850.0);
    assert_eq!(entry.age, None);
    entry.validate().unwrap();
}

#[test]
fn validate_rejects_activity_and_age_out_of_range() {
    let mut entry = sample_entry();
    entry.activity_level = 6;
    assert_eq!(
        entry.validate().unwrap_err(),
        EntryValidationError::ActivityLevelOutOfRange(6)
    );

    let mut entry = sample_entry();
    entry.age = Some(121);
    assert_eq!(
        entry.validate().unwrap_err(),
        EntryValidationError::AgeOutOfRange(121)
    );
}

#[test]
fn validate_rejects_non_finite_weight() {
    let mut entry = sample_entry();
    entry.weight = f64::INFINITY;
    let err = entry.validate().unwrap_err();
    assert!(matches!(
        err,
        EntryValidationError::NotPositive { field: "weight", .. }
    ));
}
