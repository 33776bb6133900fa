//! The week window that weekly statistics and the grid are computed over.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of days in a week window.
pub const DAYS_IN_WEEK: usize = 7;

/// First day of the displayed week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weeks run Sunday to Saturday.
    #[default]
    Sunday,
    /// Weeks run Monday to Sunday.
    Monday,
}

impl WeekStart {
    /// The chrono weekday this week starts on.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

/// Anchor of the 7-day statistics window.
///
/// Built once from "today" and never advanced on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekReference {
    start: NaiveDate,
}

impl WeekReference {
    /// The week that contains `date`.
    #[must_use]
    pub fn containing(date: NaiveDate, week_start: WeekStart) -> Self {
        let offset = match week_start {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        Self {
            start: date - Duration::days(i64::from(offset)),
        }
    }

    /// A window starting exactly at `start`, whatever weekday that is.
    #[must_use]
    pub const fn starting_at(start: NaiveDate) -> Self {
        Self { start }
    }

    /// First day of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (inclusive).
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(DAYS_IN_WEEK as i64 - 1)
    }

    /// The seven days of the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..DAYS_IN_WEEK as i64).map(move |i| start + Duration::days(i))
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Human-readable range, e.g. `Sun, Oct 18 - Sat, Oct 24`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%a, %b %-d"),
            self.end().format("%a, %b %-d")
        )
    }
}
