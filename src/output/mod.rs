//! Output formatting for habitgrid.
//!
//! Renders views as colored terminal text or as JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::HabitError;
use crate::habits::WeekReference;
use crate::stats::{DashboardStats, HabitView, WeekOverview};

pub use json::*;
pub use pretty::*;

/// Format the weekly screen based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_overview(overview: &WeekOverview, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_overview_pretty(overview)),
        OutputFormat::Json => to_json(overview),
    }
}

/// Format a single habit based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit(view: &HabitView, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_pretty(view)),
        OutputFormat::Json => to_json(view),
    }
}

/// Format the dashboard based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_dashboard(
    stats: &DashboardStats,
    week: &WeekReference,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_dashboard_pretty(stats, Some(week))),
        OutputFormat::Json => to_json(stats),
    }
}
