//! Streak calculations.

use chrono::{Duration, NaiveDate};

use crate::habits::Habit;

/// How many days back the current streak is allowed to reach, today included.
pub const STREAK_LOOKBACK_DAYS: u32 = 365;

/// Consecutive completed days ending at `today` (inclusive).
///
/// Zero when `today` itself is not completed. Capped at
/// [`STREAK_LOOKBACK_DAYS`].
#[must_use]
pub fn current_streak(habit: &Habit, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut check_date = today;

    while streak < STREAK_LOOKBACK_DAYS && habit.is_completed_on(check_date) {
        streak += 1;
        check_date -= Duration::days(1);
    }

    streak
}

/// Longest run of calendar-consecutive completed days in the whole history.
#[must_use]
pub fn best_streak(habit: &Habit) -> u32 {
    let mut longest = 0;
    let mut streak = 0;
    let mut prev_date: Option<NaiveDate> = None;

    for date in habit.completed_dates.iter() {
        streak = match prev_date {
            Some(prev) if (date - prev).num_days() == 1 => streak + 1,
            _ => 1,
        };
        longest = longest.max(streak);
        prev_date = Some(date);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::HabitId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn habit_with(dates: impl IntoIterator<Item = NaiveDate>) -> Habit {
        let mut habit = Habit::new(
            HabitId(1),
            "Exercise",
            "2026-01-01T00:00:00Z".parse().unwrap(),
        )
        .unwrap();
        habit.completed_dates = dates.into_iter().collect();
        habit
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn test_current_streak_zero_without_today() {
        let habit = habit_with((1..=10).map(days_ago));
        assert_eq!(current_streak(&habit, today()), 0);
    }

    #[test]
    fn test_current_streak_counts_back_to_gap() {
        // today, 1, 2, 3 days ago; gap at 4; 5 days ago again
        let habit = habit_with([0, 1, 2, 3, 5].into_iter().map(days_ago));
        assert_eq!(current_streak(&habit, today()), 4);
    }

    #[test]
    fn test_current_streak_only_today() {
        let habit = habit_with([today()]);
        assert_eq!(current_streak(&habit, today()), 1);
    }

    #[test]
    fn test_current_streak_capped_at_lookback() {
        let habit = habit_with((0..500).map(days_ago));
        assert_eq!(current_streak(&habit, today()), STREAK_LOOKBACK_DAYS);
        assert_eq!(best_streak(&habit), 500);
    }

    #[test]
    fn test_current_streak_ignores_future_days() {
        let habit = habit_with([today() + Duration::days(1), today()]);
        assert_eq!(current_streak(&habit, today()), 1);
    }

    #[test]
    fn test_best_streak_empty_is_zero() {
        let habit = habit_with([]);
        assert_eq!(best_streak(&habit), 0);
    }

    #[test]
    fn test_best_streak_single_day_is_one() {
        let habit = habit_with([days_ago(40)]);
        assert_eq!(best_streak(&habit), 1);
    }

    #[test]
    fn test_best_streak_ending_yesterday() {
        let habit = habit_with((1..=5).map(days_ago));
        assert_eq!(current_streak(&habit, today()), 0);
        assert_eq!(best_streak(&habit), 5);
    }

    #[test]
    fn test_best_streak_picks_longest_run() {
        let habit = habit_with(
            [30, 29, 28, 20, 19, 18, 17, 16, 2, 1, 0]
                .into_iter()
                .map(days_ago),
        );
        assert_eq!(best_streak(&habit), 5);
        assert_eq!(current_streak(&habit, today()), 3);
    }

    #[test]
    fn test_best_streak_across_month_and_leap_day() {
        let dates = [
            NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ];
        assert_eq!(best_streak(&habit_with(dates)), 3);
    }

    #[test]
    fn test_best_streak_monotonic_when_extending() {
        let mut habit = habit_with([days_ago(100)]);
        let mut last = best_streak(&habit);
        for n in (90..100).rev() {
            habit.completed_dates.insert(days_ago(n));
            let now = best_streak(&habit);
            assert!(now >= last);
            last = now;
        }
        assert_eq!(last, 11);
    }
}
