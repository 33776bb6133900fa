use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::HOME_ENV;

#[derive(Parser)]
#[command(name = "habitgrid")]
#[command(about = "Track daily habits in a weekly grid, with streaks and completion rates")]
#[command(long_about = "habitgrid - A weekly habit tracker for the terminal

Add the habits you want to build, tick them off day by day, and watch
your streaks and weekly completion rate grow.

QUICK START:
  habitgrid add \"Exercise\"          Start tracking a habit
  habitgrid toggle 1                  Mark habit #1 done today
  habitgrid toggle 1 yesterday        Mark habit #1 done yesterday
  habitgrid                           Show this week's grid

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  habitgrid <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` config value.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Show the week containing this day instead of the current week
    ///
    /// Accepts the same expressions as `toggle`, e.g. `last monday` or
    /// `2024-06-03`.
    #[arg(short, long, global = true)]
    pub week: Option<String>,

    /// Data directory (default: ~/.habitgrid)
    #[arg(long, env = HOME_ENV, global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the weekly grid for every habit (default)
    ///
    /// Each habit gets a row of seven days, its current and best streak,
    /// and its completion rate for the week. A summary follows.
    #[command(alias = "w")]
    Week,

    /// Add a new habit
    ///
    /// # Examples
    ///
    ///   habitgrid add Exercise
    ///   habitgrid add "Drink Water"
    #[command(alias = "a")]
    Add {
        /// Habit name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Show one habit
    Show {
        /// Habit ID
        id: String,
    },

    /// Rename a habit
    Rename {
        /// Habit ID
        id: String,

        /// New name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Mark a day done, or undo it if it already is
    ///
    /// # Examples
    ///
    ///   habitgrid toggle 1                 Today
    ///   habitgrid toggle 1 yesterday
    ///   habitgrid toggle 1 "3 days ago"
    ///   habitgrid toggle 1 monday          Most recent Monday
    ///   habitgrid toggle 1 2024-06-03
    #[command(alias = "t")]
    Toggle {
        /// Habit ID
        id: String,

        /// Day to toggle (default: today)
        #[arg(default_value = "today")]
        day: String,
    },

    /// Delete a habit and its history
    #[command(alias = "rm")]
    Delete {
        /// Habit ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete all habits and data
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Clear this week's marks for every habit
    ///
    /// Only days inside the displayed week are cleared; older history stays.
    ResetWeek {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show summary statistics
    Stats,

    /// Export all habits as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Replace all habits with a JSON export
    Import {
        /// File produced by `habitgrid export`
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Add sample habits to an empty tracker
    Demo,

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for configuration.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a default config file if none exists
    Init,

    /// Print the config file location
    Path,
}
