//! Tracing subscriber setup
//!
//! The wizard owns the terminal while it runs, so its logs go to a file in the
//! data directory. Every other command logs to stderr.

use clap::ValueEnum;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides `--log-level`
pub const LOG_ENV_VAR: &str = "QRGEN_LOG";

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Where log lines are written
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    /// Append to `file_name` inside `dir`
    File { dir: &'a Path, file_name: &'a str },
}

/// Build the filter, letting `QRGEN_LOG` win over the CLI level.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level.to_filter_directive()))
}

/// Install the global subscriber.
///
/// For file targets the returned guard must be held until exit so buffered
/// lines get flushed.
pub fn initialize_tracing(level: LogLevel, target: LogTarget<'_>) -> Option<WorkerGuard> {
    let filter = build_filter(level);

    match target {
        LogTarget::Stderr => {
            // Logs to stderr, stdout carries command output
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
            None
        }
        LogTarget::File { dir, file_name } => {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("Warning: cannot create log directory {}: {}", dir.display(), e);
                return None;
            }

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            Some(guard)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(LogLevel::default(), LogLevel::Warn);
        assert_eq!(LogLevel::Debug.to_filter_directive(), "debug");
        assert_eq!(LogLevel::Error.to_filter_directive(), "error");
    }

    #[test]
    fn test_level_parses_from_cli_value() {
        assert_eq!(LogLevel::from_str("trace", true).unwrap(), LogLevel::Trace);
        assert!(LogLevel::from_str("verbose", true).is_err());
    }
}
