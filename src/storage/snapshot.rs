//! JSON interchange for export and import.
//!
//! The document is a bare array of habits:
//! `[{"id": 1, "name": "...", "completedDates": {"YYYY-MM-DD": true}, "createdAt": "..."}]`.

use std::path::Path;

use crate::error::HabitError;
use crate::habits::{Habit, StoreSnapshot};

/// Render habits as the interchange document.
///
/// # Errors
///
/// Returns `HabitError::Parse` if serialization fails.
pub fn to_json(habits: &[Habit]) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(habits)?)
}

/// Parse an interchange document into a snapshot.
///
/// The id counter is set just past the highest imported id.
///
/// # Errors
///
/// Returns `HabitError::Parse` for malformed JSON and `HabitError::Validation`
/// for blank names, duplicate ids, or ids too large to allocate after.
pub fn from_json(contents: &str) -> Result<StoreSnapshot, HabitError> {
    let mut habits: Vec<Habit> = serde_json::from_str(contents)?;
    for habit in &mut habits {
        habit.name = habit.name.trim().to_string();
    }

    let mut snapshot = StoreSnapshot { habits, next_id: 1 };
    snapshot.validate()?;
    if let Some(max) = snapshot.habits.iter().map(|h| h.id).max() {
        snapshot.next_id = max.successor()?.0;
    }
    Ok(snapshot)
}

/// Write the interchange document to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn export_to_file(habits: &[Habit], path: &Path) -> Result<(), HabitError> {
    std::fs::write(path, to_json(habits)?)?;
    Ok(())
}

/// Read an interchange document from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub fn import_from_file(path: &Path) -> Result<StoreSnapshot, HabitError> {
    let contents = std::fs::read_to_string(path)?;
    from_json(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::habits::{HabitId, HabitStore};

    const SAMPLE: &str = r#"[
        {
            "id": 1700000000000,
            "name": "Exercise",
            "completedDates": {"2026-10-18": true, "2026-10-17": true},
            "createdAt": "2026-10-18T09:00:00.000Z"
        },
        {
            "id": 2,
            "name": "  Read ",
            "completedDates": {},
            "createdAt": "2026-10-18T09:00:00Z"
        }
    ]"#;

    #[test]
    fn test_from_json() {
        let snapshot = from_json(SAMPLE).unwrap();
        assert_eq!(snapshot.habits.len(), 2);
        assert_eq!(snapshot.habits[0].id, HabitId(1_700_000_000_000));
        assert_eq!(snapshot.habits[1].name, "Read");
        assert_eq!(snapshot.next_id, 1_700_000_000_001);
        assert!(snapshot.habits[0]
            .is_completed_on(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let doc = r#"[
            {"id": 1, "name": "A", "completedDates": {}, "createdAt": "2026-10-18T09:00:00Z"},
            {"id": 1, "name": "B", "completedDates": {}, "createdAt": "2026-10-18T09:00:00Z"}
        ]"#;
        assert!(matches!(from_json(doc), Err(HabitError::Validation(_))));
    }

    #[test]
    fn test_from_json_rejects_blank_name() {
        let doc = r#"[{"id": 1, "name": " ", "completedDates": {}, "createdAt": "2026-10-18T09:00:00Z"}]"#;
        assert!(matches!(from_json(doc), Err(HabitError::Validation(_))));
    }

    #[test]
    fn test_from_json_rejects_largest_id() {
        let doc = r#"[
            {"id": 1, "name": "A", "completedDates": {}, "createdAt": "2026-10-18T09:00:00Z"},
            {"id": 9223372036854775807, "name": "B", "completedDates": {}, "createdAt": "2026-10-18T09:00:00Z"}
        ]"#;
        let err = from_json(doc).unwrap_err();
        assert!(matches!(err, HabitError::Validation(_)));
        assert_eq!(err.to_string(), "habit id out of range");
    }

    #[test]
    fn test_from_json_accepts_id_below_limit() {
        let doc = r#"[{"id": 9223372036854775806, "name": "A", "completedDates": {}, "createdAt": "2026-10-18T09:00:00Z"}]"#;
        let snapshot = from_json(doc).unwrap();
        assert_eq!(snapshot.next_id, i64::MAX);

        let mut store = HabitStore::from_snapshot(snapshot);
        let now = "2026-10-18T09:00:00Z".parse().unwrap();
        assert!(store.add("B", now).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        let snapshot = from_json("[]").unwrap();
        assert!(snapshot.habits.is_empty());
        assert_eq!(snapshot.next_id, 1);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(from_json("{"), Err(HabitError::Parse(_))));
    }

    #[test]
    fn test_file_export_import() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("habits.json");

        let mut store = HabitStore::new();
        let id = store
            .add("Exercise", "2026-10-18T09:00:00Z".parse().unwrap())
            .unwrap();
        store.toggle(id, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());

        export_to_file(store.habits(), &path).unwrap();
        let snapshot = import_from_file(&path).unwrap();
        assert_eq!(snapshot.habits, store.habits());
    }

    #[test]
    fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = import_from_file(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(HabitError::Io(_))));
    }
}
