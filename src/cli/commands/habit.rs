//! Everyday habit commands: viewing, adding, renaming, toggling.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::json;

use super::not_found;
use crate::cli::args::OutputFormat;
use crate::core::parse_day;
use crate::error::HabitError;
use crate::habits::HabitId;
use crate::output::{format_dashboard, format_habit, format_overview, to_json};
use crate::session::Tracker;
use crate::storage::HabitRepository;

/// Show the weekly grid.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn week<R: HabitRepository>(
    tracker: &Tracker<R>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    format_overview(&tracker.overview(), format)
}

/// Show the dashboard only.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn stats<R: HabitRepository>(
    tracker: &Tracker<R>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    format_dashboard(&tracker.dashboard(), &tracker.week(), format)
}

/// Add a habit.
///
/// # Errors
///
/// Returns `HabitError::Validation` for a blank name.
pub fn add<R: HabitRepository>(
    tracker: &mut Tracker<R>,
    name: &str,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let id = tracker.add(name, now)?;
    let Some(view) = tracker.habit_view(id) else {
        return not_found(id, format);
    };

    match format {
        OutputFormat::Json => to_json(&view),
        OutputFormat::Pretty => Ok(format!(
            "{} Added habit {}: {}",
            "✓".green(),
            format!("#{id}").dimmed(),
            view.name.bold()
        )),
    }
}

/// Show one habit.
///
/// # Errors
///
/// Returns an error for a malformed id or if output formatting fails.
pub fn show<R: HabitRepository>(
    tracker: &Tracker<R>,
    id: &str,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let id: HabitId = id.parse()?;
    match tracker.habit_view(id) {
        Some(view) => format_habit(&view, format),
        None => not_found(id, format),
    }
}

/// Rename a habit.
///
/// # Errors
///
/// Returns `HabitError::Validation` for a malformed id or a blank name.
pub fn rename<R: HabitRepository>(
    tracker: &mut Tracker<R>,
    id: &str,
    name: &str,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let id: HabitId = id.parse()?;
    if !tracker.rename(id, name)? {
        return not_found(id, format);
    }
    let name = tracker.store().get(id).map(|h| h.name.clone()).unwrap_or_default();

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "name": name })),
        OutputFormat::Pretty => Ok(format!("{} Renamed #{id} to {}", "✓".green(), name.bold())),
    }
}

/// Toggle completion of a habit on a day.
///
/// # Errors
///
/// Returns an error for a malformed id or a day that cannot be parsed.
pub fn toggle<R: HabitRepository>(
    tracker: &mut Tracker<R>,
    id: &str,
    day: &str,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let id: HabitId = id.parse()?;
    let date = parse_day(day, tracker.today())?;
    let Some(done) = tracker.toggle(id, date) else {
        return not_found(id, format);
    };
    let name = tracker.store().get(id).map(|h| h.name.clone()).unwrap_or_default();

    match format {
        OutputFormat::Json => to_json(&json!({
            "id": id,
            "date": date,
            "completed": done,
        })),
        OutputFormat::Pretty => {
            let day = date.format("%a, %b %-d");
            if done {
                Ok(format!("{} {} done on {day}", "✓".green(), name.bold()))
            } else {
                Ok(format!("{} {} unmarked on {day}", "○".dimmed(), name.bold()))
            }
        }
    }
}

/// Seed demo habits.
///
/// # Errors
///
/// Returns an error if no ids are left or output formatting fails.
pub fn demo<R: HabitRepository>(
    tracker: &mut Tracker<R>,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let added = tracker.seed_demo(now)?;
    match format {
        OutputFormat::Json => to_json(&json!({ "added": added })),
        OutputFormat::Pretty if added == 0 => Ok(format!(
            "{} Demo habits are only added to an empty tracker.",
            "!".yellow()
        )),
        OutputFormat::Pretty => Ok(format!("{} Added {added} demo habits", "✓".green())),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{now, today, tracker};
    use super::*;

    #[test]
    fn test_add_rejects_blank_name() {
        let mut tracker = tracker();
        let err = add(&mut tracker, "   ", now(), OutputFormat::Pretty).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a habit name");
        assert!(tracker.store().is_empty());
    }

    #[test]
    fn test_toggle_json() {
        let mut tracker = tracker();
        add(&mut tracker, "Exercise", now(), OutputFormat::Pretty).unwrap();

        let out = toggle(&mut tracker, "1", "today", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["completed"], true);
        assert_eq!(value["date"], "2026-10-18");

        let out = toggle(&mut tracker, "#1", "today", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["completed"], false);
    }

    #[test]
    fn test_toggle_yesterday() {
        let mut tracker = tracker();
        add(&mut tracker, "Read", now(), OutputFormat::Pretty).unwrap();
        toggle(&mut tracker, "1", "yesterday", OutputFormat::Pretty).unwrap();

        let habit = tracker.store().get(HabitId(1)).unwrap();
        assert!(habit.is_completed_on(today().pred_opt().unwrap()));
        assert!(!habit.is_completed_on(today()));
    }

    #[test]
    fn test_toggle_unknown_id_is_notice() {
        let mut tracker = tracker();
        let out = toggle(&mut tracker, "9", "today", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["found"], false);
    }

    #[test]
    fn test_toggle_bad_day() {
        let mut tracker = tracker();
        add(&mut tracker, "Read", now(), OutputFormat::Pretty).unwrap();
        let err = toggle(&mut tracker, "1", "someday", OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, HabitError::InvalidDate(_)));
    }

    #[test]
    fn test_rename() {
        let mut tracker = tracker();
        add(&mut tracker, "Read", now(), OutputFormat::Pretty).unwrap();
        rename(&mut tracker, "1", "  Read 20 pages ", OutputFormat::Pretty).unwrap();
        assert_eq!(tracker.store().get(HabitId(1)).unwrap().name, "Read 20 pages");

        assert!(rename(&mut tracker, "1", "", OutputFormat::Pretty).is_err());
        assert!(rename(&mut tracker, "abc", "Run", OutputFormat::Pretty).is_err());
    }

    #[test]
    fn test_stats_json() {
        let mut tracker = tracker();
        add(&mut tracker, "Exercise", now(), OutputFormat::Pretty).unwrap();
        toggle(&mut tracker, "1", "today", OutputFormat::Pretty).unwrap();

        let out = stats(&tracker, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total_habits"], 1);
        assert_eq!(value["completed_today"], 1);
        assert_eq!(value["longest_streak"], 1);
        assert_eq!(value["weekly_rate"], 14);
    }

    #[test]
    fn test_demo_only_on_empty() {
        let mut tracker = tracker();
        demo(&mut tracker, now(), OutputFormat::Pretty).unwrap();
        assert_eq!(tracker.store().len(), 3);
        let out = demo(&mut tracker, now(), OutputFormat::Json).unwrap();
        assert!(out.contains("\"added\": 0"));
    }
}
