//! Shared constants used across the application

use std::time::Duration;

/// How long a transient banner stays visible before it is cleared.
pub const BANNER_DURATION: Duration = Duration::from_millis(3000);

/// Peer address used when neither the CLI nor the config names one.
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:9002";

/// Command prefixes the server treats as administrative. These need a
/// confirmation password typed on the following line.
pub const PRIVILEGED_PREFIXES: [&str; 2] = ["/kick", "/ban"];

/// Oldest transcript lines are dropped past this point.
pub const MAX_TRANSCRIPT_LINES: usize = 5000;

pub const SYSTEM_LABEL: &str = "system";
pub const PASSWORD_PROMPT: &str = "Please enter the admin password";
pub const CONNECTION_ERROR_TEXT: &str = "Connection error, please retry.";
pub const CONNECTION_CLOSED_TEXT: &str = "Connection closed, please retry.";
pub const LOGIN_FAILED_FALLBACK: &str = "Login failed.";
pub const UNKNOWN_ERROR_FALLBACK: &str = "Unknown error.";
