//! habitgrid - A weekly habit tracker for the terminal
//!
//! Habits are tracked as sets of completed days. The store enforces naming
//! rules and two-step confirmation for destructive actions; statistics
//! (streaks, weekly rates, the dashboard) are derived on demand.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod habits;
pub mod logging;
pub mod output;
pub mod session;
pub mod stats;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::HabitError;
pub use habits::{Habit, HabitId, HabitStore};
pub use session::Tracker;
