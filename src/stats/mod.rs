//! Statistics over habit history.
//!
//! Everything here is a pure function of the store's habits, "today", and
//! the week window:
//! - Current and best streaks
//! - Per-habit and aggregate weekly completion rates
//! - Grid and dashboard views for renderers

pub mod dashboard;
pub mod streaks;
pub mod weekly;

pub use dashboard::{DashboardStats, DayCell, HabitView, WeekOverview};
pub use streaks::{best_streak, current_streak, STREAK_LOOKBACK_DAYS};
pub use weekly::{aggregate_weekly_rate, percentage, weekly_completion_rate};
