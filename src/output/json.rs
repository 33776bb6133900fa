//! JSON output formatting for habitgrid.

use serde::Serialize;

use crate::error::HabitError;

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(value)?)
}
