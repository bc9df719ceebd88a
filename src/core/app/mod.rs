//! Application state and the action/command loop around it.
//!
//! Everything that changes client state arrives as an [`AppAction`] and is
//! applied by [`apply_action`] to completion before the next one. Side
//! effects that need the runtime (opening sockets, sending frames, arming
//! timers) come back out as [`AppCommand`]s for the event loop to perform.

use tracing::debug;

use crate::core::banner::BannerScope;
use crate::core::constants::BANNER_DURATION;
use crate::core::render::TranscriptEntry;

pub mod actions;
pub mod session;
pub mod ui_state;


pub use actions::{apply_action, apply_actions, AppAction, AppCommand};
pub use session::{ChannelState, Credentials, Session};
pub use ui_state::{InputField, UiState, View};

pub struct App {
    pub server_url: String,
    pub session: Option<Session>,
    pub ui: UiState,
    last_connection_id: u64,
}

impl App {
    pub fn new(server_url: impl Into<String>, prefill_username: Option<&str>) -> Self {
        Self {
            server_url: server_url.into(),
            session: None,
            ui: UiState::new(prefill_username),
            last_connection_id: 0,
        }
    }

    pub(crate) fn next_connection_id(&mut self) -> u64 {
        self.last_connection_id += 1;
        self.last_connection_id
    }

    /// Shows a banner and returns the command that will clear it.
    pub fn show_banner(&mut self, scope: BannerScope, text: impl Into<String>) -> AppCommand {
        let ticket = self.ui.banners.show(scope, text);
        AppCommand::ScheduleBannerClear {
            scope,
            ticket,
            after: BANNER_DURATION,
        }
    }

    /// Formats an entry against the session's cursors and appends it.
    pub fn render_entry(&mut self, entry: &TranscriptEntry) {
        let Some(session) = self.session.as_mut() else {
            debug!(?entry, "no session; entry not rendered");
            return;
        };
        let self_name = session.username().to_string();
        let lines = session.render.render(entry, &self_name);
        self.ui.append_lines(lines);
    }

    pub fn status_line(&self) -> String {
        match &self.session {
            None => "Not connected".to_string(),
            Some(session) => match session.channel {
                ChannelState::Connecting => format!("Connecting to {}...", self.server_url),
                ChannelState::Open => format!("Connected as {}", session.username()),
                ChannelState::Closed => {
                    "Disconnected. Press Esc to log in again.".to_string()
                }
            },
        }
    }
}
