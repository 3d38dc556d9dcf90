//! Tracing subscriber setup.
//!
//! `RUST_LOG` selects what is recorded (default `info`). The interactive
//! dashboard owns the terminal, so it logs to a file; one-shot commands log to
//! stderr, keeping stdout for their output.

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt};

use crate::errors::Error;

const DEFAULT_FILTER: &str = "info";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `<tmp>/construction_dashboard.log`.
    pub fn default_file() -> Self {
        LogTarget::File(std::env::temp_dir().join("construction_dashboard.log"))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Call once, before the first log line.
pub fn init_logging(target: &LogTarget) -> Result<(), Error> {
    let builder = fmt().with_env_filter(env_filter()).with_target(true);
    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    result.map_err(|e| Error::Logging(e.to_string()))
}
