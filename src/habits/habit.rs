//! The habit record and its completion set.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HabitError;

/// Canonical on-disk format for calendar days.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stable identifier of a habit. Allocated by the store, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl HabitId {
    /// The id allocated after this one.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` when the id space is exhausted.
    pub fn successor(self) -> Result<Self, HabitError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or_else(|| HabitError::Validation("habit id out of range".to_string()))
    }
}

impl std::str::FromStr for HabitId {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .trim_start_matches('#')
            .parse()
            .map_err(|_| HabitError::Validation(format!("Invalid habit id: {s}")))?;
        if value <= 0 {
            return Err(HabitError::Validation(format!("Invalid habit id: {s}")));
        }
        Ok(Self(value))
    }
}

/// The set of days on which a habit was marked done.
///
/// Backed by a `BTreeSet`, so iteration is always chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet(BTreeSet<NaiveDate>);

impl CompletionSet {
    /// Create an empty completion set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the habit was done on `date`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    /// Mark `date` as done. Returns `false` if it already was.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    /// Clear the mark on `date`. Returns `false` if it was not set.
    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.0.remove(&date)
    }

    /// Flip the mark on `date` and return the new state.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.0.remove(&date) {
            false
        } else {
            self.0.insert(date);
            true
        }
    }

    /// Number of completed days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the habit has never been completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Completed days in chronological order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }

    /// Completed days within `[start, end]`, inclusive. Empty when `start > end`.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
        // BTreeSet::range panics on inverted bounds.
        self.0
            .range(start..=end.max(start))
            .copied()
            .filter(move |_| start <= end)
    }

    /// Drop every completion inside `[start, end]`. Returns how many were removed.
    pub fn remove_range(&mut self, start: NaiveDate, end: NaiveDate) -> usize {
        let doomed: Vec<NaiveDate> = self.range(start, end).collect();
        for date in &doomed {
            self.0.remove(date);
        }
        doomed.len()
    }
}

impl FromIterator<NaiveDate> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Serialized as `{"YYYY-MM-DD": true, ...}`.
impl Serialize for CompletionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<String, bool> = self
            .0
            .iter()
            .map(|d| (d.format(DATE_FORMAT).to_string(), true))
            .collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CompletionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut set = BTreeSet::new();
        for (key, done) in map {
            let date = NaiveDate::parse_from_str(&key, DATE_FORMAT)
                .map_err(|e| serde::de::Error::custom(format!("invalid date key '{key}': {e}")))?;
            // A false marker means "not done", same as an absent key.
            if done {
                set.insert(date);
            }
        }
        Ok(Self(set))
    }
}

/// A single tracked behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Stable identifier.
    pub id: HabitId,
    /// Display name; never empty once stored.
    pub name: String,
    /// Days on which the habit was done.
    #[serde(default)]
    pub completed_dates: CompletionSet,
    /// Creation instant. Informational only.
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Build a habit with an empty history.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` if the trimmed name is empty.
    pub fn new(id: HabitId, name: &str, created_at: DateTime<Utc>) -> Result<Self, HabitError> {
        Ok(Self {
            id,
            name: validate_name(name)?,
            completed_dates: CompletionSet::new(),
            created_at,
        })
    }

    /// Whether the habit was done on `date`.
    #[must_use]
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(date)
    }
}

/// Trim a candidate name and reject it if nothing is left.
///
/// # Errors
///
/// Returns `HabitError::Validation` for empty or whitespace-only names.
pub fn validate_name(name: &str) -> Result<String, HabitError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HabitError::empty_name());
    }
    Ok(trimmed.to_string())
}
