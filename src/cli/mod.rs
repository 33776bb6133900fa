//! Command-line surface for habitgrid.

pub mod args;
pub mod commands;
pub mod prompt;
