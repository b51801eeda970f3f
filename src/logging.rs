//! Structured logging.
//!
//! The terminal UI owns stdout, so log lines go to a file. Without a log
//! file no subscriber is installed and `tracing` macros are no-ops.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init(log_file: Option<&Path>, default_level: &str) -> Result<bool> {
    if log_file.is_none() {
        return Ok(false);
    }
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("invalid log level {default_level:?}"))?;
    init_with_filter(log_file, filter)
}

pub fn init_with_filter(log_file: Option<&Path>, filter: EnvFilter) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn no_log_file_installs_nothing() {
        assert!(!init(None, "info").unwrap());
    }

    #[test]
    fn writes_events_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numgrid.log");
        assert!(init_with_filter(Some(&path), EnvFilter::new("info")).unwrap());

        tracing::info!(target: "numgrid", "grid session started");
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("grid session started"));
    }
}
