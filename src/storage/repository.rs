//! Habit persistence.
//!
//! The tracker only talks to a [`HabitRepository`]; the `SQLite` version is
//! what the binary uses.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::HabitError;
use crate::habits::{CompletionSet, Habit, HabitId, StoreSnapshot, DATE_FORMAT};

const NEXT_ID_KEY: &str = "next_id";

/// Load and save whole-store snapshots.
#[cfg_attr(test, mockall::automock)]
pub trait HabitRepository {
    /// Read the persisted store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or holds bad data.
    fn load(&self) -> Result<StoreSnapshot, HabitError>;

    /// Replace the persisted store with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, snapshot: &StoreSnapshot) -> Result<(), HabitError>;

    /// Copy the persisted store aside before it is overwritten.
    ///
    /// Returns where the copy went, or `None` when there is nothing on disk
    /// to keep.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy cannot be made.
    fn backup(&self) -> Result<Option<PathBuf>, HabitError>;
}

/// Repository backed by the local `SQLite` database.
pub struct SqliteRepository {
    db: Database,
    path: Option<PathBuf>,
}

impl SqliteRepository {
    /// Wrap an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db, path: None }
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_at(path: &Path) -> Result<Self, HabitError> {
        Ok(Self {
            db: Database::open_at(path)?,
            path: Some(path.to_path_buf()),
        })
    }

    fn load_completions(&self, id: HabitId) -> Result<CompletionSet, HabitError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare("SELECT date FROM habit_completions WHERE habit_id = ?1")
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([id.0], |row| row.get::<_, String>(0))
            .map_err(|e| HabitError::Database(format!("Failed to query completions: {e}")))?;

        let mut dates = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| HabitError::Database(e.to_string()))?;
            let date = NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| {
                HabitError::Database(format!("Bad completion date '{raw}' for habit {id}: {e}"))
            })?;
            dates.push(date);
        }

        Ok(dates.into_iter().collect())
    }

    fn load_next_id(&self) -> Result<i64, HabitError> {
        let conn = self.db.connection();
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = ?1",
                [NEXT_ID_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| HabitError::Database(format!("Failed to read id counter: {e}")))?;

        match raw {
            None => Ok(1),
            Some(value) => value
                .parse()
                .map_err(|_| HabitError::Database(format!("Bad id counter '{value}'"))),
        }
    }
}

impl HabitRepository for SqliteRepository {
    fn load(&self) -> Result<StoreSnapshot, HabitError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare("SELECT id, name, created_at FROM habits ORDER BY position, id")
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| HabitError::Database(format!("Failed to query habits: {e}")))?;

        let mut habits = Vec::new();
        for row in rows {
            let (id, name, created_at) = row.map_err(|e| HabitError::Database(e.to_string()))?;
            let id = HabitId(id);
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| {
                    HabitError::Database(format!("Bad creation time for habit {id}: {e}"))
                })?;

            habits.push(Habit {
                id,
                name,
                completed_dates: self.load_completions(id)?,
                created_at,
            });
        }

        let snapshot = StoreSnapshot {
            habits,
            next_id: self.load_next_id()?,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<(), HabitError> {
        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .map_err(|e| HabitError::Database(format!("Failed to begin transaction: {e}")))?;

        tx.execute("DELETE FROM habits", [])
            .map_err(|e| HabitError::Database(format!("Failed to clear habits: {e}")))?;

        for (position, habit) in snapshot.habits.iter().enumerate() {
            tx.execute(
                "INSERT INTO habits (id, name, created_at, position) VALUES (?1, ?2, ?3, ?4)",
                params![
                    habit.id.0,
                    habit.name,
                    habit.created_at.to_rfc3339(),
                    position as i64,
                ],
            )
            .map_err(|e| HabitError::Database(format!("Failed to insert habit: {e}")))?;

            for date in habit.completed_dates.iter() {
                tx.execute(
                    "INSERT INTO habit_completions (habit_id, date) VALUES (?1, ?2)",
                    params![habit.id.0, date.format(DATE_FORMAT).to_string()],
                )
                .map_err(|e| HabitError::Database(format!("Failed to insert completion: {e}")))?;
            }
        }

        tx.execute(
            "INSERT INTO store_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![NEXT_ID_KEY, snapshot.next_id.to_string()],
        )
        .map_err(|e| HabitError::Database(format!("Failed to write id counter: {e}")))?;

        tx.commit()
            .map_err(|e| HabitError::Database(format!("Failed to commit: {e}")))
    }

    fn backup(&self) -> Result<Option<PathBuf>, HabitError> {
        let Some(path) = self.path.as_deref().filter(|p| p.exists()) else {
            return Ok(None);
        };

        let target = backup_path(path);
        std::fs::copy(path, &target).map_err(|e| {
            HabitError::Database(format!(
                "Failed to copy {} to {}: {e}",
                path.display(),
                target.display()
            ))
        })?;
        Ok(Some(target))
    }
}

/// First free `<db>.bak`, `<db>.bak.1`, ... next to the database.
fn backup_path(path: &Path) -> PathBuf {
    let with_suffix = |suffix: &str| {
        let mut name = OsString::from(path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    };

    let mut candidate = with_suffix(".bak");
    let mut n = 1;
    while candidate.exists() {
        candidate = with_suffix(&format!(".bak.{n}"));
        n += 1;
    }
    candidate
}
