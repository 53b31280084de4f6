//! # Logging Setup
//!
//! Installs the process-wide `tracing` subscriber used by the binaries: an
//! `EnvFilter` driven by `RUST_LOG`, a console layer on stderr, and an
//! optional JSON file layer rotated daily through `tracing-appender`.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Failure to install the subscriber.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The log directory could not be created.
    #[error("Failed to create log directory {}: {source}", .path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither `RUST_LOG` nor the default level is a valid filter.
    #[error("Invalid log filter {filter:?}: {message}")]
    Filter { filter: String, message: String },

    /// Another subscriber was installed first.
    #[error("A global subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Where log lines go.
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Filter used when `RUST_LOG` is unset.
    pub default_level: String,
    /// Colour console output.
    pub ansi: bool,
    /// Directory for the JSON log file; no file layer when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            ansi: true,
            log_dir: None,
        }
    }
}

/// Installs the global subscriber for `app_name`.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the lifetime of the program.
pub fn setup_logging(app_name: &str, options: &LoggerOptions) -> Result<Option<WorkerGuard>, LoggerError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&options.default_level).map_err(|e| LoggerError::Filter {
            filter: options.default_level.clone(),
            message: e.to_string(),
        })?,
    };

    let console_layer = fmt::layer()
        .with_target(true)
        .with_ansi(options.ansi)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &options.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggerError::LogDir {
                path: dir.clone(),
                source,
            })?;
            let (writer, guard) = non_blocking(rolling::daily(dir, format!("{app_name}.log")));
            let layer = fmt::layer().with_ansi(false).with_writer(writer).json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))?;

    info!(app = app_name, "logging initialized");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_layer_creates_directory_and_second_install_fails() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let options = LoggerOptions {
            ansi: false,
            log_dir: Some(log_dir.clone()),
            ..LoggerOptions::default()
        };

        let guard = setup_logging("apis-test", &options).unwrap();
        assert!(guard.is_some());
        assert!(log_dir.is_dir());

        let err = setup_logging("apis-test", &LoggerOptions::default()).unwrap_err();
        assert!(matches!(err, LoggerError::AlreadyInstalled(_)));
    }
}
