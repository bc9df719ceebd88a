//! Diagnostic logging.
//!
//! The terminal belongs to the TUI, so trace output only goes to a file, and
//! only when one was requested with `--debug-log`.

use std::error::Error;
use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "PALAVER_LOG";
const DEFAULT_FILTER: &str = "info,tungstenite=warn,tokio_tungstenite=warn";

#[derive(Debug)]
pub enum LoggingError {
    Open { path: PathBuf, source: io::Error },
    Install(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::Open { path, .. } => {
                write!(f, "Failed to open log file {}", path.display())
            }
            LoggingError::Install(reason) => write!(f, "Failed to install logger: {reason}"),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoggingError::Open { source, .. } => Some(source),
            LoggingError::Install(_) => None,
        }
    }
}

fn build_filter(directive: Option<&str>) -> EnvFilter {
    match directive.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// Installs the global subscriber. Without a path this is a no-op.
pub fn init(debug_log: Option<&Path>) -> Result<(), LoggingError> {
    let Some(path) = debug_log else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let directive = std::env::var(LOG_FILTER_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive.as_deref()))
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))
}
