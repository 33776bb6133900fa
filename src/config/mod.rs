//! Configuration management for habitgrid.
//!
//! This module handles loading and saving configuration from `~/.habitgrid/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig, TrackerConfig};
