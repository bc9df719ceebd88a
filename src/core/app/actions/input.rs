use tracing::{debug, info};

use super::{App, AppAction, AppCommand};
use crate::core::app::ui_state::{InputField, View};
use crate::core::classifier::{classify, Classification};

pub(super) fn handle_input_action(app: &mut App, action: AppAction) -> Vec<AppCommand> {
    match action {
        AppAction::SubmitInput => submit_input(app),
        AppAction::ClearBanner { scope, ticket } => {
            if !app.ui.banners.clear(scope, ticket) {
                debug!(?scope, ticket, "banner already replaced");
            }
            Vec::new()
        }
        AppAction::FocusNext => {
            app.ui.focus_next();
            Vec::new()
        }
        AppAction::ToggleRecipient => {
            if app.ui.view == View::Chat {
                app.ui.toggle_recipient();
            }
            Vec::new()
        }
        AppAction::ScrollTranscript { lines } => {
            app.ui.scroll_by(lines);
            Vec::new()
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn submit_input(app: &mut App) -> Vec<AppCommand> {
    let input = app.ui.input_value(InputField::Message);
    let recipient = if app.ui.recipient_visible {
        app.ui.input_value(InputField::Recipient)
    } else {
        String::new()
    };

    let Some(session) = app.session.as_mut() else {
        debug!("input submitted without a session");
        return Vec::new();
    };
    let connection_id = session.connection_id;
    let classification = classify(&input, &recipient, &mut session.pending_command);
    let awaiting_password = session.pending_command.is_some();

    if classification.consumes_input() {
        app.ui.clear_input(InputField::Message);
        app.ui.clear_input(InputField::Recipient);
    }
    app.ui.set_message_masked(awaiting_password);

    match classification {
        Classification::Nothing => Vec::new(),
        Classification::AwaitConfirmation { notice } => {
            info!("privileged command awaiting confirmation");
            app.render_entry(&notice);
            Vec::new()
        }
        Classification::Send {
            message,
            local_echo,
        } => {
            if let Some(entry) = local_echo {
                app.render_entry(&entry);
            }
            debug!(connection_id, kind = message.kind(), "queueing outbound frame");
            vec![AppCommand::Send {
                connection_id,
                message,
            }]
        }
    }
}
