//! Command-line interface parsing and handling
//!
//! Parses arguments, applies `set`/`unset` config edits, and starts the
//! interactive client for the default `chat` command.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::core::config::data::Config;
use crate::logging;
use crate::ui::chat_loop::run_chat;

#[derive(Parser, Debug)]
#[command(name = "palaver", version)]
#[command(about = "A terminal client for a WebSocket group chat room")]
#[command(
    long_about = "Palaver is a full-screen terminal client for a JSON-over-WebSocket group chat \
service. Log in with a username and password, talk to the room, send private messages, and \
run moderator commands.\n\n\
Environment Variables:\n\
  PALAVER_LOG       Log filter directive used with --debug-log (default: info)\n\n\
Controls:\n\
  Enter             Submit the login form or send the message\n\
  Tab               Move to the next field\n\
  Ctrl+P            Show or hide the private recipient field\n\
  PageUp/PageDown   Scroll the transcript\n\
  Esc               Return to the login form after a disconnect\n\
  Ctrl+C            Quit the application\n\n\
Chat commands:\n\
  /list             Show who is online\n\
  /kick <user>      Remove a user (asks for the admin password)\n\
  /ban <user>       Ban a user (asks for the admin password)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// WebSocket URL of the chat server
    #[arg(short = 's', long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Username to prefill in the login form
    #[arg(short = 'u', long, global = true, value_name = "NAME")]
    pub username: Option<String>,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Set configuration values
    Set {
        /// Configuration key to set (server, username)
        key: Option<String>,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset (server, username)
        key: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigKey {
    Server,
    Username,
}

impl ConfigKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "server" => Some(ConfigKey::Server),
            "username" => Some(ConfigKey::Username),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigKey::Server => "server",
            ConfigKey::Username => "username",
        }
    }

    fn slot(self, config: &mut Config) -> &mut Option<String> {
        match self {
            ConfigKey::Server => &mut config.server,
            ConfigKey::Username => &mut config.username,
        }
    }
}

/// Outcome of a `set`/`unset` edit, used to pick the message to print.
#[derive(Debug, PartialEq, Eq)]
enum ConfigEdit {
    Set { key: ConfigKey, value: String },
    Unset { key: ConfigKey },
    Show,
}

fn apply_set(
    config: &mut Config,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<ConfigEdit, String> {
    let Some(key) = key else {
        return Ok(ConfigEdit::Show);
    };
    let key = ConfigKey::parse(key).ok_or_else(|| format!("Unknown config key: {key}"))?;
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => {
            *key.slot(config) = Some(value.to_string());
            Ok(ConfigEdit::Set {
                key,
                value: value.to_string(),
            })
        }
        None => Ok(ConfigEdit::Show),
    }
}

fn apply_unset(config: &mut Config, key: &str) -> Result<ConfigEdit, String> {
    let key = ConfigKey::parse(key).ok_or_else(|| format!("Unknown config key: {key}"))?;
    *key.slot(config) = None;
    Ok(ConfigEdit::Unset { key })
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    logging::init(args.debug_log.as_deref())?;

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match apply_set(&mut config, key.as_deref(), value.as_deref()) {
                Ok(ConfigEdit::Set { key, value }) => {
                    config.save()?;
                    println!("✅ Set {} to: {value}", key.name());
                }
                Ok(_) => config.print_all(),
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match apply_unset(&mut config, &key) {
                Ok(ConfigEdit::Unset { key }) => {
                    config.save()?;
                    println!("✅ Unset {}", key.name());
                }
                Ok(_) => config.print_all(),
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Chat => {
            let config = Config::load()?;
            let server = config.resolve_server(args.server.as_deref());
            let username = config.resolve_username(args.username.as_deref());
            info!(%server, "starting chat client");
            run_chat(server, username).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_is_the_default_command() {
        let args = Args::try_parse_from(["palaver", "--server", "ws://example:1"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.server.as_deref(), Some("ws://example:1"));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let args = Args::try_parse_from(["palaver", "chat", "-u", "alice", "--debug-log", "x.log"])
            .unwrap();
        assert_eq!(args.command, Some(Commands::Chat));
        assert_eq!(args.username.as_deref(), Some("alice"));
        assert_eq!(args.debug_log, Some(PathBuf::from("x.log")));
    }

    #[test]
    fn set_updates_known_keys() {
        let mut config = Config::default();
        let edit = apply_set(&mut config, Some("server"), Some("ws://chat:9002")).unwrap();
        assert_eq!(
            edit,
            ConfigEdit::Set {
                key: ConfigKey::Server,
                value: "ws://chat:9002".into()
            }
        );
        assert_eq!(config.server.as_deref(), Some("ws://chat:9002"));

        apply_set(&mut config, Some("username"), Some("alice")).unwrap();
        assert_eq!(config.username.as_deref(), Some("alice"));
    }

    #[test]
    fn set_without_value_only_shows() {
        let mut config = Config::default();
        assert_eq!(apply_set(&mut config, None, None), Ok(ConfigEdit::Show));
        assert_eq!(
            apply_set(&mut config, Some("server"), Some("  ")),
            Ok(ConfigEdit::Show)
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut config = Config::default();
        assert!(apply_set(&mut config, Some("theme"), Some("dark")).is_err());
        assert!(apply_unset(&mut config, "theme").is_err());
    }

    #[test]
    fn unset_clears_value() {
        let mut config = Config {
            server: Some("ws://chat:9002".into()),
            username: Some("alice".into()),
        };
        apply_unset(&mut config, "username").unwrap();
        assert_eq!(config.username, None);
        assert!(config.server.is_some());
    }
}
