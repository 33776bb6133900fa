//! Habit records, the week window, and the habit store.

mod habit;
mod store;
mod week;

pub use habit::{validate_name, CompletionSet, Habit, HabitId, DATE_FORMAT};
pub use store::{Applied, Confirmation, HabitStore, PendingAction, StoreSnapshot};
pub use week::{WeekReference, WeekStart, DAYS_IN_WEEK};
