use diettrack_core::{DietEntry, EntryStore, JsonEntryStore, StoreError};
use std::fs;

fn entry(date: &str, calories: f64, weight: f64) -> DietEntry {
    DietEntry {
        date: date.to_string(),
        activity_level: 3,
        calories,
        protein: 100.0,
        carbs: 250.0,
        fat: 70.0,
        weight,
        age: None,
    }
}

fn store_in(dir: &tempfile::TempDir) -> JsonEntryStore {
    JsonEntryStore::new(dir.path().join("user_data.json"))
}

#[test]
fn missing_file_loads_as_empty_set() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.load().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn blank_file_loads_as_empty_set() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "  \n").unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn malformed_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "{\"date\": \"01/01/2024\"").unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }), "unexpected: {err}");
}

#[test]
fn save_then_load_preserves_values_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let mut second = entry("1/2/2024", 1987.123456789, 79.95);
    second.age = Some(41);
    let entries = vec![
        entry("02/01/2024", 2100.0, 80.4),
        second,
        entry("01/03/2024", 0.1 + 0.2, 79.8),
    ];

    store.save(&entries).unwrap();
    assert_eq!(store.load().unwrap(), entries);
}

#[test]
fn save_creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonEntryStore::new(dir.path().join("nested").join("user_data.json"));
    store.save(&[entry("01/01/2024", 2000.0, 80.0)]).unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn append_adds_exactly_one_entry_at_the_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&[entry("01/01/2024", 2000.0, 80.0)]).unwrap();

    let appended = entry("01/02/2024", 1900.0, 79.6);
    let count = store.append(&appended).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(count, 2);
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.last(), Some(&appended));
}

#[test]
fn append_rejects_invalid_entry_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let err = store.append(&entry("02/30/2024", 2000.0, 80.0)).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(!store.path().exists());
}

#[test]
fn delete_removes_only_first_exact_match() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let entries = vec![
        entry("01/01/2024", 2000.0, 80.0),
        entry("01/02/2024", 2100.0, 80.2),
        entry("01/01/2024", 2200.0, 80.5),
    ];
    store.save(&entries).unwrap();

    assert!(store.delete_by_date("01/01/2024").unwrap());

    let loaded = store.load().unwrap();
    assert_eq!(loaded, vec![entries[1].clone(), entries[2].clone()]);
}

#[test]
fn delete_of_absent_date_leaves_set_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let entries = vec![entry("01/01/2024", 2000.0, 80.0)];
    store.save(&entries).unwrap();

    assert!(!store.delete_by_date("02/02/2024").unwrap());
    assert_eq!(store.load().unwrap(), entries);
}

#[test]
fn delete_matches_date_strings_literally() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&[entry("01/01/2024", 2000.0, 80.0)]).unwrap();

    assert!(!store.delete_by_date("1/1/2024").unwrap());
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn saved_file_is_a_json_array_with_storage_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&[entry("01/01/2024", 2000.0, 80.0)]).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    for key in ["date", "activity_level", "calories", "protein", "carbs", "fat", "weight"] {
        assert!(first.get(key).is_some(), "missing key `{key}`");
    }
}

#[cfg(unix)]
#[test]
fn save_keeps_existing_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&[entry("01/01/2024", 2000.0, 80.0)]).unwrap();
    fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

    store.save(&[entry("01/02/2024", 2100.0, 80.5)]).unwrap();

    let mode = fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
    assert_eq!(store.load().unwrap().len(), 1);
}
