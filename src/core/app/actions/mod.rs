mod connection;
mod input;

use std::time::Duration;

use super::App;
use crate::core::banner::BannerScope;
use crate::protocol::OutboundMessage;
use crate::transport::TransportUpdate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Log in with the username and password fields.
    SubmitLogin,
    /// Submit the message input (and recipient, if any).
    SubmitInput,
    /// Leave a dead session and show the login form again.
    ReturnToLogin,
    Transport(TransportUpdate),
    ClearBanner {
        scope: BannerScope,
        ticket: u64,
    },
    FocusNext,
    ToggleRecipient,
    ScrollTranscript {
        lines: i32,
    },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Connect {
        connection_id: u64,
        url: String,
    },
    Send {
        connection_id: u64,
        message: OutboundMessage,
    },
    ScheduleBannerClear {
        scope: BannerScope,
        ticket: u64,
        after: Duration,
    },
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        commands.extend(apply_action(app, action));
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Vec<AppCommand> {
    match action {
        AppAction::SubmitLogin | AppAction::ReturnToLogin | AppAction::Transport(_) => {
            connection::handle_connection_action(app, action)
        }

        AppAction::SubmitInput
        | AppAction::ClearBanner { .. }
        | AppAction::FocusNext
        | AppAction::ToggleRecipient
        | AppAction::ScrollTranscript { .. }
        | AppAction::Quit => input::handle_input_action(app, action),
    }
}
