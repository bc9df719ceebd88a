use tracing::{debug, info, warn};

use super::{App, AppAction, AppCommand};
use crate::core::app::session::{ChannelState, Credentials, Session};
use crate::core::app::ui_state::{InputField, View};
use crate::core::banner::BannerScope;
use crate::core::constants::{CONNECTION_CLOSED_TEXT, CONNECTION_ERROR_TEXT};
use crate::core::dispatcher::{dispatch_frame, DispatchEffect};
use crate::protocol::OutboundMessage;
use crate::transport::{TransportEvent, TransportUpdate};

pub(super) fn handle_connection_action(app: &mut App, action: AppAction) -> Vec<AppCommand> {
    match action {
        AppAction::SubmitLogin => submit_login(app),
        AppAction::ReturnToLogin => {
            if app.session.as_ref().map_or(true, Session::is_closed) {
                app.ui.enter_login();
            }
            Vec::new()
        }
        AppAction::Transport(update) => handle_transport(app, update),
        _ => Vec::new(),
    }
}

/// Starts a fresh session. Any previous channel is abandoned.
fn submit_login(app: &mut App) -> Vec<AppCommand> {
    let credentials = Credentials {
        username: app.ui.input_value(InputField::Username),
        password: app.ui.input_value(InputField::Password),
    };
    let connection_id = app.next_connection_id();
    info!(connection_id, username = %credentials.username, "login submitted");

    app.session = Some(Session::new(connection_id, credentials));
    app.ui.set_message_masked(false);
    vec![AppCommand::Connect {
        connection_id,
        url: app.server_url.clone(),
    }]
}

fn handle_transport(app: &mut App, update: TransportUpdate) -> Vec<AppCommand> {
    let TransportUpdate {
        connection_id,
        event,
    } = update;

    let Some(session) = app
        .session
        .as_mut()
        .filter(|session| session.connection_id == connection_id)
    else {
        debug!(connection_id, ?event, "ignoring event from abandoned connection");
        return Vec::new();
    };

    match event {
        TransportEvent::Opened => {
            session.channel = ChannelState::Open;
            match session.pending_credentials.take() {
                Some(Credentials { username, password }) => vec![AppCommand::Send {
                    connection_id,
                    message: OutboundMessage::Login { username, password },
                }],
                None => Vec::new(),
            }
        }
        TransportEvent::Frame(text) => {
            let self_name = session.username().to_string();
            let effects = dispatch_frame(&text, &self_name);
            if effects.is_empty() {
                debug!(connection_id, "frame produced no effects");
            }
            apply_effects(app, effects)
        }
        TransportEvent::Error(reason) => {
            warn!(connection_id, %reason, "transport error");
            session.mark_closed();
            vec![app.show_banner(BannerScope::Login, CONNECTION_ERROR_TEXT)]
        }
        TransportEvent::Closed => {
            session.mark_closed();
            vec![app.show_banner(BannerScope::Chat, CONNECTION_CLOSED_TEXT)]
        }
    }
}

fn apply_effects(app: &mut App, effects: Vec<DispatchEffect>) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for effect in effects {
        match effect {
            DispatchEffect::EnterChat => {
                if app.ui.view != View::Chat {
                    info!("login accepted");
                }
                app.ui.enter_chat();
            }
            DispatchEffect::Banner { scope, text } => {
                commands.push(app.show_banner(scope, text));
            }
            DispatchEffect::Render(entry) => app.render_entry(&entry),
            DispatchEffect::ResetPendingCommand => {
                if let Some(session) = app.session.as_mut() {
                    if let Some(stale) = session.pending_command.take() {
                        debug!(command = %stale, "dropping unconfirmed command");
                    }
                }
                app.ui.set_message_masked(false);
            }
        }
    }
    commands
}
