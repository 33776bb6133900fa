//! File logging bootstrap.
//!
//! Logs go to rotating files under `~/.habitgrid/logs/` so that command
//! output on stdout stays clean. Events are written as `event=... key=value`.

use std::path::Path;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

use crate::error::HabitError;

const LOG_FILE_BASENAME: &str = "habitgrid";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

/// Accept only the level names `log` understands, case-insensitively.
///
/// # Errors
///
/// Returns `HabitError::Config` for anything else.
pub fn normalize_level(level: &str) -> Result<&'static str, HabitError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" => Ok("error"),
        "warn" | "warning" => Ok("warn"),
        "info" => Ok("info"),
        "debug" => Ok("debug"),
        "trace" => Ok("trace"),
        "off" => Ok("off"),
        other => Err(HabitError::Config(format!("Unsupported log level `{other}`"))),
    }
}

/// Start the file logger.
///
/// The returned handle must be kept alive for the life of the process; the
/// logger flushes when it is dropped.
///
/// # Errors
///
/// Returns `HabitError::Config` for an unknown level or when the backend
/// cannot be started.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle, HabitError> {
    let level = normalize_level(level)?;

    let handle = Logger::try_with_str(level)
        .map_err(|e| HabitError::Config(format!("Invalid log level `{level}`: {e}")))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| HabitError::Config(format!("Failed to start logger: {e}")))?;

    log::debug!(
        "event=logging_ready level={level} log_dir={} version={}",
        log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert_eq!(normalize_level("off").unwrap(), "off");
    }

    #[test]
    fn test_normalize_level_rejects_unknown() {
        assert!(matches!(normalize_level("loud"), Err(HabitError::Config(_))));
    }
}
