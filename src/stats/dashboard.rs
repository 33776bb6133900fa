//! Presentation-facing views: per-habit rows and the dashboard summary.
//!
//! Nothing here is cached. Views are rebuilt from the store on every refresh.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::streaks::{best_streak, current_streak};
use super::weekly::{aggregate_weekly_rate, weekly_completion_rate};
use crate::habits::{Habit, HabitId, WeekReference};

/// One day of a habit's weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// Calendar day.
    pub date: NaiveDate,
    /// Short weekday name, e.g. `Sun`.
    pub weekday: String,
    /// Whether the habit was done that day.
    pub is_completed: bool,
    /// Whether this cell is today.
    pub is_today: bool,
}

/// Everything a renderer needs for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitView {
    /// Habit id.
    pub id: HabitId,
    /// Display name.
    pub name: String,
    /// The seven days of the week window, in order.
    pub days: Vec<DayCell>,
    /// Consecutive done days ending today.
    pub current_streak: u32,
    /// Longest run of consecutive done days ever.
    pub best_streak: u32,
    /// Completion rate over the week window, 0 to 100.
    pub weekly_rate: u8,
}

impl HabitView {
    /// Build the view of `habit` for `week`.
    #[must_use]
    pub fn build(habit: &Habit, week: &WeekReference, today: NaiveDate) -> Self {
        let days = week
            .days()
            .map(|date| DayCell {
                date,
                weekday: weekday_name(date).to_string(),
                is_completed: habit.is_completed_on(date),
                is_today: date == today,
            })
            .collect();

        Self {
            id: habit.id,
            name: habit.name.clone(),
            days,
            current_streak: current_streak(habit, today),
            best_streak: best_streak(habit),
            weekly_rate: weekly_completion_rate(habit, week),
        }
    }
}

/// Summary figures across all habits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of habits.
    pub total_habits: usize,
    /// Habits marked done today.
    pub completed_today: usize,
    /// Largest current or best streak of any habit.
    pub longest_streak: u32,
    /// Aggregate completion rate for the week window.
    pub weekly_rate: u8,
}

impl DashboardStats {
    /// Compute the summary for `habits`.
    #[must_use]
    pub fn compute(habits: &[Habit], week: &WeekReference, today: NaiveDate) -> Self {
        let completed_today = habits.iter().filter(|h| h.is_completed_on(today)).count();

        let longest_streak = habits
            .iter()
            .map(|h| current_streak(h, today).max(best_streak(h)))
            .max()
            .unwrap_or(0);

        Self {
            total_habits: habits.len(),
            completed_today,
            longest_streak,
            weekly_rate: aggregate_weekly_rate(habits, week),
        }
    }
}

/// The full weekly screen: every habit row plus the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOverview {
    /// First day of the week window.
    pub week_start: NaiveDate,
    /// Last day of the week window.
    pub week_end: NaiveDate,
    /// The day treated as today.
    pub today: NaiveDate,
    /// One row per habit, in display order.
    pub habits: Vec<HabitView>,
    /// Summary across all habits.
    pub dashboard: DashboardStats,
}

impl WeekOverview {
    /// Build the overview for `habits` in display order.
    #[must_use]
    pub fn build(habits: &[Habit], week: &WeekReference, today: NaiveDate) -> Self {
        Self {
            week_start: week.start(),
            week_end: week.end(),
            today,
            habits: habits
                .iter()
                .map(|h| HabitView::build(h, week, today))
                .collect(),
            dashboard: DashboardStats::compute(habits, week, today),
        }
    }
}

fn weekday_name(date: NaiveDate) -> &'static str {
    const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    NAMES[date.weekday().num_days_from_sunday() as usize]
}
