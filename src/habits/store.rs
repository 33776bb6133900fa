//! The habit store: the only mutation surface for habits.
//!
//! Destructive commands are two-phase. `request_*` returns a [`Confirmation`]
//! naming the pending action; nothing changes until it is handed back to
//! [`HabitStore::confirm`]. Dropping or declining it leaves the store as it was.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::habit::{validate_name, Habit, HabitId};
use super::week::WeekReference;
use crate::error::HabitError;

/// Complete persistent state of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Habits in display order.
    pub habits: Vec<Habit>,
    /// The id the next added habit will get.
    pub next_id: i64,
}

impl StoreSnapshot {
    /// Check the invariants a store relies on.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` on a blank name, a non-positive id,
    /// an id with no successor, or a duplicate id.
    pub fn validate(&self) -> Result<(), HabitError> {
        let mut seen = HashSet::new();
        for habit in &self.habits {
            if habit.id.0 <= 0 {
                return Err(HabitError::Validation(format!(
                    "Invalid habit id: {}",
                    habit.id
                )));
            }
            habit.id.successor()?;
            if !seen.insert(habit.id) {
                return Err(HabitError::Validation(format!(
                    "Duplicate habit id: {}",
                    habit.id
                )));
            }
            validate_name(&habit.name)?;
        }
        Ok(())
    }
}

/// A destructive action waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Remove one habit.
    DeleteHabit(HabitId),
    /// Remove every habit.
    ClearAll,
    /// Clear all completion marks inside a week window.
    ResetWeek(WeekReference),
    /// Replace the whole store with imported habits.
    ReplaceAll(StoreSnapshot),
}

/// Move-only token for a destructive action.
///
/// It cannot be cloned, so a confirmed action applies at most once.
#[derive(Debug)]
#[must_use = "a destructive action only applies once confirmed"]
pub struct Confirmation {
    action: PendingAction,
}

impl Confirmation {
    const fn new(action: PendingAction) -> Self {
        Self { action }
    }

    /// The action this token stands for.
    #[must_use]
    pub const fn action(&self) -> &PendingAction {
        &self.action
    }

    /// The question to put to the user.
    #[must_use]
    pub fn prompt(&self) -> String {
        match &self.action {
            PendingAction::DeleteHabit(_) => {
                "Are you sure you want to delete this habit?".to_string()
            }
            PendingAction::ClearAll => {
                "Are you sure you want to delete all habits and data? This cannot be undone!"
                    .to_string()
            }
            PendingAction::ResetWeek(week) => format!(
                "Are you sure you want to reset this week's progress ({}) for all habits?",
                week.label()
            ),
            PendingAction::ReplaceAll(snapshot) => format!(
                "Replace all current habits with {} imported habit(s)?",
                snapshot.habits.len()
            ),
        }
    }

    /// Abandon the action. State is left untouched.
    pub fn decline(self) {}
}

/// What a confirmed action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The habit was removed; `None` if the id was already gone.
    Deleted(Option<Habit>),
    /// Every habit was removed; carries how many there were.
    Cleared(usize),
    /// Completion marks removed from the week window.
    WeekReset {
        /// Total marks removed across all habits.
        removed: usize,
    },
    /// The store was replaced; carries the new habit count.
    Replaced(usize),
}

/// Ordered collection of habits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStore {
    habits: Vec<Habit>,
    next_id: i64,
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitStore {
    /// An empty store whose first habit gets id 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            habits: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from persisted state.
    ///
    /// The id counter is raised past every existing id, so a stale counter
    /// cannot hand out a live id. At `i64::MAX` the counter saturates and
    /// [`HabitStore::add`] refuses to allocate.
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let floor = snapshot
            .habits
            .iter()
            .map(|h| h.id.0)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self {
            next_id: snapshot.next_id.max(floor).max(1),
            habits: snapshot.habits,
        }
    }

    /// Copy of the current state, for persistence.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            habits: self.habits.clone(),
            next_id: self.next_id,
        }
    }

    /// Habits in display (insertion) order.
    #[must_use]
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Look up a habit by id.
    #[must_use]
    pub fn get(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    fn get_mut(&mut self, id: HabitId) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id == id)
    }

    /// Number of habits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.habits.len()
    }

    /// True when there are no habits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// The id the next added habit will receive.
    #[must_use]
    pub const fn next_id(&self) -> HabitId {
        HabitId(self.next_id)
    }

    /// Append a new habit with an empty history.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` if the trimmed name is empty or the
    /// id space is exhausted; the store is unchanged in either case.
    pub fn add(&mut self, name: &str, created_at: DateTime<Utc>) -> Result<HabitId, HabitError> {
        let id = HabitId(self.next_id);
        let habit = Habit::new(id, name, created_at)?;
        self.next_id = id.successor()?.0;
        self.habits.push(habit);
        Ok(id)
    }

    /// Rename a habit in place.
    ///
    /// Returns `Ok(false)` if no habit has this id.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` if the trimmed name is empty; the old
    /// name is kept.
    pub fn rename(&mut self, id: HabitId, new_name: &str) -> Result<bool, HabitError> {
        let name = validate_name(new_name)?;
        match self.get_mut(id) {
            Some(habit) => {
                habit.name = name;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flip completion of `date` for a habit.
    ///
    /// Returns the new state (`true` = done), or `None` if no habit has this id.
    pub fn toggle(&mut self, id: HabitId, date: NaiveDate) -> Option<bool> {
        self.get_mut(id).map(|h| h.completed_dates.toggle(date))
    }

    /// Ask to delete a habit. Unknown ids confirm to a no-op.
    pub fn request_delete(&self, id: HabitId) -> Confirmation {
        Confirmation::new(PendingAction::DeleteHabit(id))
    }

    /// Ask to remove every habit.
    pub fn request_clear_all(&self) -> Confirmation {
        Confirmation::new(PendingAction::ClearAll)
    }

    /// Ask to clear every completion mark inside `week`.
    pub fn request_reset_week(&self, week: WeekReference) -> Confirmation {
        Confirmation::new(PendingAction::ResetWeek(week))
    }

    /// Ask to replace the store with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` if the snapshot breaks store invariants.
    pub fn request_replace_all(&self, snapshot: StoreSnapshot) -> Result<Confirmation, HabitError> {
        snapshot.validate()?;
        Ok(Confirmation::new(PendingAction::ReplaceAll(snapshot)))
    }

    /// Apply a confirmed destructive action.
    pub fn confirm(&mut self, confirmation: Confirmation) -> Applied {
        match confirmation.action {
            PendingAction::DeleteHabit(id) => {
                let removed = self
                    .habits
                    .iter()
                    .position(|h| h.id == id)
                    .map(|index| self.habits.remove(index));
                Applied::Deleted(removed)
            }
            PendingAction::ClearAll => {
                let count = self.habits.len();
                self.habits.clear();
                Applied::Cleared(count)
            }
            PendingAction::ResetWeek(week) => {
                let removed = self
                    .habits
                    .iter_mut()
                    .map(|h| h.completed_dates.remove_range(week.start(), week.end()))
                    .sum();
                Applied::WeekReset { removed }
            }
            PendingAction::ReplaceAll(snapshot) => {
                // Ids handed out before the import stay retired.
                let next_id = self.next_id.max(snapshot.next_id);
                let replaced = Self::from_snapshot(StoreSnapshot {
                    habits: snapshot.habits,
                    next_id,
                });
                let count = replaced.len();
                *self = replaced;
                Applied::Replaced(count)
            }
        }
    }

    /// Fill an empty store with sample habits. Returns how many were added.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` if the id space cannot fit the
    /// samples; nothing is added in that case.
    pub fn seed_demo(&mut self, today: NaiveDate, now: DateTime<Utc>) -> Result<usize, HabitError> {
        if !self.is_empty() {
            return Ok(0);
        }
        let samples = [("Exercise", true), ("Read", false), ("Drink Water", true)];
        let mut ids = Vec::with_capacity(samples.len());
        let mut next = HabitId(self.next_id);
        for _ in &samples {
            ids.push(next);
            next = next.successor()?;
        }

        for ((name, done_today), id) in samples.into_iter().zip(ids) {
            let mut habit = Habit {
                id,
                name: name.to_string(),
                completed_dates: super::CompletionSet::new(),
                created_at: now,
            };
            if done_today {
                habit.completed_dates.insert(today);
            }
            self.habits.push(habit);
        }
        self.next_id = next.0;
        Ok(samples.len())
    }
}
