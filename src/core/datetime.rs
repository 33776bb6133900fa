//! Day expression parsing.
//!
//! Habits are marked for days that have already happened, so relative
//! expressions resolve backwards: `monday` means the most recent Monday on or
//! before today, not the next one.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::HabitError;

static DAYS_AGO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\s*(d|day|days|w|week|weeks)\s+ago$")
        .unwrap_or_else(|e| panic!("Invalid days-ago regex: {e}"))
});

/// Resolve a day expression relative to `today`.
///
/// Supports:
/// - `today`, `yesterday`
/// - `3 days ago`, `2d ago`, `1 week ago`
/// - `monday`, `mon` (most recent occurrence, today included)
/// - `last monday` (strictly before today)
/// - `dec 15`, `december 15` (most recent occurrence)
/// - `2024-12-15` (ISO format)
/// - `12/15`, `12/15/2024`
///
/// # Errors
///
/// Returns `HabitError::InvalidDate` if the expression is not understood.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate, HabitError> {
    let normalized = input.trim().to_lowercase();
    parse_day_internal(&normalized, today).ok_or_else(|| HabitError::InvalidDate(input.trim().to_string()))
}

fn parse_day_internal(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    match input {
        "" | "today" => return Some(today),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {}
    }

    if let Some(date) = parse_days_ago(input, today) {
        return Some(date);
    }

    if let Some(date) = parse_weekday(input, today) {
        return Some(date);
    }

    if let Some(date) = parse_month_day(input, today) {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    parse_us_date(input, today)
}

/// Parse "N days/weeks ago".
fn parse_days_ago(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = DAYS_AGO_PATTERN.captures(input)?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
    let days = if caps.get(2)?.as_str().starts_with('w') {
        amount.checked_mul(7)?
    } else {
        amount
    };
    today.checked_sub_signed(Duration::try_days(days)?)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse weekday names, resolving to the most recent occurrence.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (is_last, day_str) = input
        .strip_prefix("last ")
        .map_or((false, input), |rest| (true, rest));

    let target = weekday_from_name(day_str)?;

    let mut days_back = (i64::from(today.weekday().num_days_from_sunday())
        - i64::from(target.num_days_from_sunday())
        + 7)
        % 7;

    // "last friday" on a Friday means a week ago
    if is_last && days_back == 0 {
        days_back = 7;
    }

    Some(today - Duration::days(days_back))
}

/// Parse month and day, e.g. `dec 15`.
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }

    let month = parse_month_name(parts[0])?;
    let day: u32 = parts[1].parse().ok()?;
    most_recent(month, day, today)
}

fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Parse US date format (MM/DD or MM/DD/YYYY).
fn parse_us_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('/').collect();

    match parts.len() {
        2 => {
            let month: u32 = parts[0].parse().ok()?;
            let day: u32 = parts[1].parse().ok()?;
            most_recent(month, day, today)
        }
        3 => {
            let month: u32 = parts[0].parse().ok()?;
            let day: u32 = parts[1].parse().ok()?;
            let year = parts[2].parse::<i32>().ok().filter(|y| *y >= 0)?;

            // Handle 2-digit years
            let year = if (0..100).contains(&year) { 2000 + year } else { year };

            NaiveDate::from_ymd_opt(year, month, day)
        }
        _ => None,
    }
}

/// This year's `month/day`, or last year's if that is still ahead of `today`.
fn most_recent(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date <= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() - 1, month, day),
    }
}
