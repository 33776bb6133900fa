//! Configuration command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::HabitError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be written or rendered.
pub fn config(
    paths: &Paths,
    current: &Config,
    cmd: &ConfigCommands,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(current),
            OutputFormat::Pretty => current.to_yaml(),
        },
        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
        ConfigCommands::Init => {
            let created = !paths.config_file.exists();
            if created {
                Config::default().save_to_path(&paths.config_file)?;
                log::info!("event=config_created path={}", paths.config_file.display());
            }
            match format {
                OutputFormat::Json => to_json(&json!({
                    "path": paths.config_file.display().to_string(),
                    "created": created,
                })),
                OutputFormat::Pretty if created => Ok(format!(
                    "{} Wrote default config to {}",
                    "✓".green(),
                    paths.config_file.display()
                )),
                OutputFormat::Pretty => Ok(format!(
                    "Config already exists at {}",
                    paths.config_file.display()
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_once() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        let current = Config::default();

        let out = config(&paths, &current, &ConfigCommands::Init, OutputFormat::Json).unwrap();
        assert!(out.contains("\"created\": true"));
        assert!(paths.config_file.exists());

        let out = config(&paths, &current, &ConfigCommands::Init, OutputFormat::Json).unwrap();
        assert!(out.contains("\"created\": false"));
    }

    #[test]
    fn test_show_yaml() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        let out = config(&paths, &Config::default(), &ConfigCommands::Show, OutputFormat::Pretty)
            .unwrap();
        assert!(out.contains("week_starts_on: sunday"));
        assert!(out.contains("level: info"));
    }

    #[test]
    fn test_path() {
        let paths = Paths::with_root("/tmp/habitgrid-test".into());
        let out = config(&paths, &Config::default(), &ConfigCommands::Path, OutputFormat::Pretty)
            .unwrap();
        assert!(out.ends_with("config.yaml"));
    }
}
