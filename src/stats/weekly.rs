//! Weekly completion rates.

use crate::habits::{Habit, WeekReference, DAYS_IN_WEEK};

/// Integer percentage of `part / whole`, rounded half up. Zero when `whole` is zero.
#[must_use]
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    // round(100 * part / whole) without floats
    let rounded = (200 * part + whole) / (2 * whole);
    u8::try_from(rounded).unwrap_or(100)
}

/// Days in `week` on which `habit` was completed.
#[must_use]
pub fn completed_days_in_week(habit: &Habit, week: &WeekReference) -> usize {
    habit
        .completed_dates
        .range(week.start(), week.end())
        .count()
}

/// Share of the seven days in `week` that were completed, 0..=100.
#[must_use]
pub fn weekly_completion_rate(habit: &Habit, week: &WeekReference) -> u8 {
    percentage(completed_days_in_week(habit, week), DAYS_IN_WEEK)
}

/// Completed days over all habit-days in `week`, 0..=100.
///
/// Zero when there are no habits.
#[must_use]
pub fn aggregate_weekly_rate(habits: &[Habit], week: &WeekReference) -> u8 {
    let completed: usize = habits
        .iter()
        .map(|h| completed_days_in_week(h, week))
        .sum();
    percentage(completed, habits.len() * DAYS_IN_WEEK)
}
