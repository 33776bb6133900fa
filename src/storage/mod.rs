//! Storage layer for habitgrid.
//!
//! - `SQLite` persistence of the habit store
//! - JSON interchange for export and import

mod database;
mod migrations;
mod repository;
pub mod snapshot;

pub use database::Database;
#[cfg(test)]
pub use repository::MockHabitRepository;
pub use repository::{HabitRepository, SqliteRepository};
