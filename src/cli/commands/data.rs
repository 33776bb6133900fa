//! Destructive and bulk commands: delete, clear, reset, export, import.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use super::{cancelled, gate, not_found};
use crate::cli::args::OutputFormat;
use crate::error::HabitError;
use crate::habits::{Applied, HabitId};
use crate::output::to_json;
use crate::session::Tracker;
use crate::storage::{snapshot, HabitRepository};

/// Delete a habit after confirmation.
///
/// # Errors
///
/// Returns an error for a malformed id or if output formatting fails.
pub fn delete<R, F>(
    tracker: &mut Tracker<R>,
    id: &str,
    yes: bool,
    ask: &mut F,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    R: HabitRepository,
    F: FnMut(&str) -> bool,
{
    let id: HabitId = id.parse()?;
    if tracker.store().get(id).is_none() {
        return not_found(id, format);
    }
    let Some(confirmation) = gate(tracker.request_delete(id), yes, ask) else {
        return cancelled(format);
    };

    match tracker.confirm(confirmation) {
        Applied::Deleted(Some(habit)) => match format {
            OutputFormat::Json => to_json(&json!({ "deleted": habit })),
            OutputFormat::Pretty => Ok(format!(
                "{} Deleted habit #{}: {}",
                "✓".green(),
                habit.id,
                habit.name
            )),
        },
        _ => not_found(id, format),
    }
}

/// Remove every habit after confirmation.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn clear<R, F>(
    tracker: &mut Tracker<R>,
    yes: bool,
    ask: &mut F,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    R: HabitRepository,
    F: FnMut(&str) -> bool,
{
    let Some(confirmation) = gate(tracker.request_clear_all(), yes, ask) else {
        return cancelled(format);
    };

    let removed = match tracker.confirm(confirmation) {
        Applied::Cleared(count) => count,
        _ => 0,
    };
    match format {
        OutputFormat::Json => to_json(&json!({ "removed": removed })),
        OutputFormat::Pretty => Ok(format!("{} Deleted {removed} habit(s)", "✓".green())),
    }
}

/// Clear the week window's marks after confirmation.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn reset_week<R, F>(
    tracker: &mut Tracker<R>,
    yes: bool,
    ask: &mut F,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    R: HabitRepository,
    F: FnMut(&str) -> bool,
{
    let Some(confirmation) = gate(tracker.request_reset_week(), yes, ask) else {
        return cancelled(format);
    };

    let removed = match tracker.confirm(confirmation) {
        Applied::WeekReset { removed } => removed,
        _ => 0,
    };
    let week = tracker.week();
    match format {
        OutputFormat::Json => to_json(&json!({
            "week_start": week.start(),
            "week_end": week.end(),
            "removed": removed,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} Cleared {removed} mark(s) for {}",
            "✓".green(),
            week.label()
        )),
    }
}

/// Write the interchange document to stdout or a file.
///
/// Stdout always receives JSON so the output can be imported again.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn export<R: HabitRepository>(
    tracker: &Tracker<R>,
    file: Option<&Path>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let habits = tracker.store().habits();
    let Some(path) = file else {
        return snapshot::to_json(habits);
    };

    snapshot::export_to_file(habits, path)?;
    log::info!("event=habits_exported count={} file={}", habits.len(), path.display());
    match format {
        OutputFormat::Json => to_json(&json!({
            "exported": habits.len(),
            "file": path.display().to_string(),
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} Exported {} habit(s) to {}",
            "✓".green(),
            habits.len(),
            path.display()
        )),
    }
}

/// Replace every habit with the contents of an export, after confirmation.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds invalid habits.
pub fn import<R, F>(
    tracker: &mut Tracker<R>,
    file: &Path,
    yes: bool,
    ask: &mut F,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    R: HabitRepository,
    F: FnMut(&str) -> bool,
{
    let snapshot = snapshot::import_from_file(file)?;
    let Some(confirmation) = gate(tracker.request_replace_all(snapshot)?, yes, ask) else {
        return cancelled(format);
    };

    let imported = match tracker.confirm(confirmation) {
        Applied::Replaced(count) => count,
        _ => 0,
    };
    match format {
        OutputFormat::Json => to_json(&json!({ "imported": imported })),
        OutputFormat::Pretty => Ok(format!("{} Imported {imported} habit(s)", "✓".green())),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{now, today, tracker};
    use super::*;
    use tempfile::TempDir;

    fn seeded() -> Tracker<crate::storage::SqliteRepository> {
        let mut tracker = tracker();
        tracker.add("Exercise", now()).unwrap();
        tracker.add("Read", now()).unwrap();
        tracker.toggle(HabitId(1), today());
        tracker
    }

    #[test]
    fn test_delete_declined_keeps_habit() {
        let mut tracker = seeded();
        let mut ask = |_: &str| false;
        let out = delete(&mut tracker, "1", false, &mut ask, OutputFormat::Json).unwrap();
        assert!(out.contains("\"confirmed\": false"));
        assert_eq!(tracker.store().len(), 2);
    }

    #[test]
    fn test_delete_confirmed() {
        let mut tracker = seeded();
        let mut ask = |prompt: &str| prompt.contains("delete this habit");
        delete(&mut tracker, "1", false, &mut ask, OutputFormat::Pretty).unwrap();
        assert!(tracker.store().get(HabitId(1)).is_none());
        assert_eq!(tracker.store().len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_skips_prompt() {
        let mut tracker = seeded();
        let mut ask = |_: &str| -> bool { panic!("should not prompt") };
        let out = delete(&mut tracker, "42", false, &mut ask, OutputFormat::Pretty).unwrap();
        assert!(out.contains("No habit with ID #42"));
    }

    #[test]
    fn test_clear_with_yes() {
        let mut tracker = seeded();
        let mut ask = |_: &str| false;
        let out = clear(&mut tracker, true, &mut ask, OutputFormat::Json).unwrap();
        assert!(out.contains("\"removed\": 2"));
        assert!(tracker.store().is_empty());

        let id = tracker.add("Walk", now()).unwrap();
        assert_eq!(id, HabitId(3));
    }

    #[test]
    fn test_reset_week() {
        let mut tracker = seeded();
        let mut ask = |_: &str| true;
        let out = reset_week(&mut tracker, false, &mut ask, OutputFormat::Json).unwrap();
        assert!(out.contains("\"removed\": 1"));
        assert!(!tracker.store().get(HabitId(1)).unwrap().is_completed_on(today()));
    }

    #[test]
    fn test_export_import_via_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.json");

        let source = seeded();
        export(&source, Some(&path), OutputFormat::Pretty).unwrap();

        let mut target = tracker();
        target.add("Other", now()).unwrap();
        let mut ask = |_: &str| true;
        import(&mut target, &path, false, &mut ask, OutputFormat::Pretty).unwrap();

        assert_eq!(target.store().len(), 2);
        assert_eq!(target.store().habits()[0].name, "Exercise");
        assert!(target.store().habits()[0].is_completed_on(today()));
    }

    #[test]
    fn test_import_invalid_file_leaves_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"id": 1, "name": "  ", "createdAt": "2026-10-18T09:00:00Z"}]"#)
            .unwrap();

        let mut tracker = seeded();
        let mut ask = |_: &str| true;
        assert!(import(&mut tracker, &path, true, &mut ask, OutputFormat::Pretty).is_err());
        assert_eq!(tracker.store().len(), 2);
    }

    #[test]
    fn test_export_stdout_is_array() {
        let tracker = seeded();
        let out = export(&tracker, None, OutputFormat::Pretty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["completedDates"]["2026-10-18"], true);
    }
}
