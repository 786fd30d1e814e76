//! `tracing` subscriber setup.
//!
//! Filtering follows `RUST_LOG` (default `info`). Line-oriented commands log to
//! stderr. The TUI owns the terminal, so it only logs when a file is configured.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, EXIT_INVALID};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
}

/// Log to stderr.
pub fn init_stderr() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Log to `path` (appending), or not at all when `path` is `None`.
pub fn init_file(path: Option<&Path>) -> Result<(), AppError> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(EXIT_INVALID, format!("Failed to open log file '{}': {e}", path.display())))?;

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
    Ok(())
}
