//! Command implementations for habitgrid.
//!
//! Every handler returns the text to print. Unknown habit ids produce a
//! notice rather than an error.

mod config;
mod data;
mod habit;

pub use config::config;
pub use data::{clear, delete, export, import, reset_week};
pub use habit::{add, demo, rename, show, stats, toggle, week};

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{Commands, OutputFormat};
use crate::error::HabitError;
use crate::habits::{Confirmation, HabitId};
use crate::output::to_json;
use crate::session::Tracker;
use crate::storage::HabitRepository;

/// Run a tracker command.
///
/// `ask` is consulted for destructive commands unless `--yes` was given.
///
/// # Errors
///
/// Returns an error for invalid input or when output formatting fails.
pub fn execute<R, F>(
    tracker: &mut Tracker<R>,
    command: Commands,
    now: DateTime<Utc>,
    format: OutputFormat,
    mut ask: F,
) -> Result<String, HabitError>
where
    R: HabitRepository,
    F: FnMut(&str) -> bool,
{
    match command {
        Commands::Week => week(tracker, format),
        Commands::Add { name } => add(tracker, &name.join(" "), now, format),
        Commands::Show { id } => show(tracker, &id, format),
        Commands::Rename { id, name } => rename(tracker, &id, &name.join(" "), format),
        Commands::Toggle { id, day } => toggle(tracker, &id, &day, format),
        Commands::Delete { id, yes } => delete(tracker, &id, yes, &mut ask, format),
        Commands::Clear { yes } => clear(tracker, yes, &mut ask, format),
        Commands::ResetWeek { yes } => reset_week(tracker, yes, &mut ask, format),
        Commands::Stats => stats(tracker, format),
        Commands::Export { file } => export(tracker, file.as_deref(), format),
        Commands::Import { file, yes } => import(tracker, &file, yes, &mut ask, format),
        Commands::Demo => demo(tracker, now, format),
        // Handled before a tracker is opened.
        Commands::Config(_) | Commands::Completions { .. } => Ok(String::new()),
    }
}

/// Hand back the confirmation only if the user agreed.
fn gate<F: FnMut(&str) -> bool>(
    confirmation: Confirmation,
    yes: bool,
    ask: &mut F,
) -> Option<Confirmation> {
    if yes || ask(&confirmation.prompt()) {
        Some(confirmation)
    } else {
        confirmation.decline();
        None
    }
}

fn not_found(id: HabitId, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "found": false })),
        OutputFormat::Pretty => Ok(format!("{} No habit with ID #{id}", "!".yellow())),
    }
}

fn cancelled(format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Json => to_json(&json!({ "confirmed": false })),
        OutputFormat::Pretty => Ok("Cancelled.".dimmed().to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{now, tracker};
    use super::*;

    #[test]
    fn test_execute_add_then_week() {
        let mut tracker = tracker();
        let out = execute(
            &mut tracker,
            Commands::Add {
                name: vec!["Drink".to_string(), "Water".to_string()],
            },
            now(),
            OutputFormat::Pretty,
            |_| false,
        )
        .unwrap();
        assert!(out.contains("Drink Water"));

        let out = execute(&mut tracker, Commands::Week, now(), OutputFormat::Json, |_| false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["habits"][0]["name"], "Drink Water");
    }

    #[test]
    fn test_gate_respects_yes_flag() {
        let tracker = tracker();
        let mut calls = 0;
        let skipped = gate(tracker.request_clear_all(), true, &mut |_: &str| {
            calls += 1;
            false
        });
        assert!(skipped.is_some());
        let declined = gate(tracker.request_clear_all(), false, &mut |_: &str| {
            calls += 1;
            false
        });
        assert!(declined.is_none());
        assert_eq!(calls, 1);
    }
}
