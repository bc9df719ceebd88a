//! Reacts to recognized inbound frames.
//!
//! The dispatcher never touches UI state itself; it describes what should
//! happen as a list of [`DispatchEffect`]s which the app applies in order.

use crate::core::banner::BannerScope;
use crate::core::constants::{LOGIN_FAILED_FALLBACK, UNKNOWN_ERROR_FALLBACK};
use crate::core::render::TranscriptEntry;
use crate::protocol::{InboundMessage, USER_LIST_ACK};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEffect {
    /// Login accepted: switch to the chat view and focus the message input.
    EnterChat,
    Banner { scope: BannerScope, text: String },
    Render(TranscriptEntry),
    /// Drop any privileged command still waiting for its password.
    ResetPendingCommand,
}

/// `self_name` is the logged-in user; a private message from them is shown
/// as sent rather than received.
pub fn dispatch(message: InboundMessage, self_name: &str) -> Vec<DispatchEffect> {
    match message {
        InboundMessage::LoginSucceeded { .. } => vec![DispatchEffect::EnterChat],
        InboundMessage::LoginFailed { message } => vec![DispatchEffect::Banner {
            scope: BannerScope::Login,
            text: message.unwrap_or_else(|| LOGIN_FAILED_FALLBACK.to_string()),
        }],
        InboundMessage::Broadcast { username, content } => {
            vec![DispatchEffect::Render(TranscriptEntry::Broadcast {
                username,
                content,
            })]
        }
        InboundMessage::Private {
            from,
            to: Some(to),
            content,
        } if from == self_name => vec![DispatchEffect::Render(TranscriptEntry::PrivateSent {
            to,
            content,
        })],
        InboundMessage::Private { from, content, .. } => {
            vec![DispatchEffect::Render(TranscriptEntry::PrivateReceived {
                from,
                content,
            })]
        }
        InboundMessage::UserList { users } => {
            vec![DispatchEffect::Render(TranscriptEntry::Roster { users })]
        }
        InboundMessage::Error { message } => vec![DispatchEffect::Banner {
            scope: BannerScope::Chat,
            text: message.unwrap_or_else(|| UNKNOWN_ERROR_FALLBACK.to_string()),
        }],
        InboundMessage::CommandFeedback { message } if message == USER_LIST_ACK => Vec::new(),
        InboundMessage::CommandFeedback { message } => vec![
            DispatchEffect::Render(TranscriptEntry::System { content: message }),
            DispatchEffect::ResetPendingCommand,
        ],
    }
}

/// Decodes a raw text frame and dispatches it. Unrecognized frames yield no
/// effects.
pub fn dispatch_frame(text: &str, self_name: &str) -> Vec<DispatchEffect> {
    match InboundMessage::decode(text) {
        Some(message) => dispatch(message, self_name),
        None => Vec::new(),
    }
}
