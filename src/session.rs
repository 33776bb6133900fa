//! The tracker session: store, persistence, and week window together.
//!
//! Every successful mutation is followed by a best-effort save. A failed save
//! is logged and kept as a warning for the caller to show; the in-memory
//! store stays the source of truth and is never rolled back.
//!
//! If loading failed, the persisted data is copied aside before the first
//! save replaces it. Without a copy nothing is saved.

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};

use crate::error::HabitError;
use crate::habits::{Applied, Confirmation, HabitId, HabitStore, StoreSnapshot, WeekReference};
use crate::stats::{DashboardStats, HabitView, WeekOverview};
use crate::storage::HabitRepository;

/// A running tracker over one repository.
pub struct Tracker<R: HabitRepository> {
    store: HabitStore,
    repository: R,
    week: WeekReference,
    today: NaiveDate,
    load_failed: bool,
    warnings: Vec<String>,
}

impl<R: HabitRepository> Tracker<R> {
    /// Load the store from `repository`.
    ///
    /// Loading fails soft: on any error the tracker starts with an empty store,
    /// and a warning is logged and queued for the caller.
    pub fn open(repository: R, today: NaiveDate, week: WeekReference) -> Self {
        let mut warnings = Vec::new();
        let (store, load_failed) = match repository.load() {
            Ok(snapshot) => {
                debug!("event=store_loaded habits={}", snapshot.habits.len());
                (HabitStore::from_snapshot(snapshot), false)
            }
            Err(e) => {
                warn!("event=store_load_failed error=\"{e}\"");
                warnings.push(format!(
                    "Could not load saved habits ({e}); starting with an empty tracker"
                ));
                (HabitStore::new(), true)
            }
        };

        Self {
            store,
            repository,
            week,
            today,
            load_failed,
            warnings,
        }
    }

    /// The habit store.
    #[must_use]
    pub const fn store(&self) -> &HabitStore {
        &self.store
    }

    /// The week window statistics are computed over.
    #[must_use]
    pub const fn week(&self) -> WeekReference {
        self.week
    }

    /// The day treated as "today".
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Load, backup, and save problems queued since the last call. Clears them.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Copy unreadable data aside. `false` means saving must not go ahead.
    fn keep_unreadable_data(&mut self) -> bool {
        if !self.load_failed {
            return true;
        }
        match self.repository.backup() {
            Ok(copy) => {
                if let Some(path) = copy {
                    info!("event=store_backed_up path={}", path.display());
                    self.warnings.push(format!(
                        "Unreadable habit data was copied to {}",
                        path.display()
                    ));
                }
                self.load_failed = false;
                true
            }
            Err(e) => {
                warn!("event=store_backup_failed error=\"{e}\"");
                self.warnings.push(format!(
                    "Could not back up unreadable habit data ({e}); changes were not saved"
                ));
                false
            }
        }
    }

    fn persist(&mut self) {
        if !self.keep_unreadable_data() {
            return;
        }
        match self.repository.save(&self.store.snapshot()) {
            Ok(()) => debug!("event=store_saved habits={}", self.store.len()),
            Err(e) => {
                warn!("event=store_save_failed error=\"{e}\"");
                self.warnings.push(format!("Could not save habits: {e}"));
            }
        }
    }

    /// Add a habit.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` for a blank name; nothing is saved.
    pub fn add(&mut self, name: &str, now: DateTime<Utc>) -> Result<HabitId, HabitError> {
        let id = self.store.add(name, now)?;
        info!("event=habit_added id={id}");
        self.persist();
        Ok(id)
    }

    /// Rename a habit. `Ok(false)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` for a blank name; nothing is saved.
    pub fn rename(&mut self, id: HabitId, new_name: &str) -> Result<bool, HabitError> {
        let renamed = self.store.rename(id, new_name)?;
        if renamed {
            info!("event=habit_renamed id={id}");
            self.persist();
        } else {
            debug!("event=rename_skipped id={id} reason=not_found");
        }
        Ok(renamed)
    }

    /// Toggle a day for a habit. `None` when the id is unknown.
    pub fn toggle(&mut self, id: HabitId, date: NaiveDate) -> Option<bool> {
        let state = self.store.toggle(id, date);
        match state {
            Some(done) => {
                info!("event=habit_toggled id={id} date={date} done={done}");
                self.persist();
            }
            None => debug!("event=toggle_skipped id={id} reason=not_found"),
        }
        state
    }

    /// Ask to delete a habit.
    pub fn request_delete(&self, id: HabitId) -> Confirmation {
        self.store.request_delete(id)
    }

    /// Ask to remove every habit.
    pub fn request_clear_all(&self) -> Confirmation {
        self.store.request_clear_all()
    }

    /// Ask to clear the current week window's marks.
    pub fn request_reset_week(&self) -> Confirmation {
        self.store.request_reset_week(self.week)
    }

    /// Ask to replace everything with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` if the snapshot is inconsistent.
    pub fn request_replace_all(&self, snapshot: StoreSnapshot) -> Result<Confirmation, HabitError> {
        self.store.request_replace_all(snapshot)
    }

    /// Apply a confirmed destructive action and save.
    pub fn confirm(&mut self, confirmation: Confirmation) -> Applied {
        let applied = self.store.confirm(confirmation);
        info!("event=action_confirmed outcome=\"{applied:?}\"");
        if !matches!(applied, Applied::Deleted(None)) {
            self.persist();
        }
        applied
    }

    /// Seed demo habits into an empty store. Returns how many were added.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` if no ids are left for the samples.
    pub fn seed_demo(&mut self, now: DateTime<Utc>) -> Result<usize, HabitError> {
        let added = self.store.seed_demo(self.today, now)?;
        if added > 0 {
            info!("event=demo_seeded habits={added}");
            self.persist();
        }
        Ok(added)
    }

    /// Grid and dashboard for every habit.
    #[must_use]
    pub fn overview(&self) -> WeekOverview {
        WeekOverview::build(self.store.habits(), &self.week, self.today)
    }

    /// View of a single habit.
    #[must_use]
    pub fn habit_view(&self, id: HabitId) -> Option<HabitView> {
        self.store
            .get(id)
            .map(|h| HabitView::build(h, &self.week, self.today))
    }

    /// Dashboard summary.
    #[must_use]
    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::compute(self.store.habits(), &self.week, self.today)
    }
}
