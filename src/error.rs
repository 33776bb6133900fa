//! Error types for habitgrid.

use thiserror::Error;

/// Errors surfaced by the tracker, its storage, and the command line.
///
/// Unknown habit ids are deliberately absent: the store treats them as
/// no-ops rather than failures.
#[derive(Error, Debug)]
pub enum HabitError {
    /// Input rejected before any state changed (e.g. an empty habit name).
    #[error("{0}")]
    Validation(String),

    /// Configuration could not be read, written, or understood.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The SQLite store failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A day expression could not be turned into a calendar date.
    #[error("Could not understand date '{0}'")]
    InvalidDate(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl HabitError {
    /// Shorthand for the empty-name validation failure.
    #[must_use]
    pub fn empty_name() -> Self {
        Self::Validation("Please enter a habit name".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            HabitError::empty_name().to_string(),
            "Please enter a habit name"
        );
        assert_eq!(
            HabitError::InvalidDate("someday".to_string()).to_string(),
            "Could not understand date 'someday'"
        );
        assert_eq!(
            HabitError::Database("locked".to_string()).to_string(),
            "Database error: locked"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let habit_err: HabitError = err.into();
        assert!(matches!(habit_err, HabitError::Parse(_)));
    }
}
