use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::DEFAULT_SERVER_URL;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// WebSocket URL of the chat server (e.g., "ws://chat.example.org:9002")
    pub server: Option<String>,
    /// Username prefilled in the login form
    pub username: Option<String>,
}

impl Config {
    /// Picks the server URL: an explicit override first, then the config
    /// file, then the built-in default.
    pub fn resolve_server(&self, cli_override: Option<&str>) -> String {
        cli_override
            .filter(|url| !url.trim().is_empty())
            .or(self.server.as_deref())
            .unwrap_or(DEFAULT_SERVER_URL)
            .to_string()
    }

    pub fn resolve_username(&self, cli_override: Option<&str>) -> Option<String> {
        cli_override
            .or(self.username.as_deref())
            .map(str::to_string)
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
