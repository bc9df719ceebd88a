//! Maps a submitted input line to exactly one outbound frame.
//!
//! Administrative commands that can remove people from the room (`/kick`,
//! `/ban`) are held back until the user types a confirmation password on
//! the next line. That next line is consumed unconditionally: it is never
//! reclassified as a message or a command.

use crate::core::constants::{PASSWORD_PROMPT, PRIVILEGED_PREFIXES};
use crate::core::render::TranscriptEntry;
use crate::protocol::OutboundMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Empty input. Nothing is sent and the input fields are left alone.
    Nothing,
    Send {
        message: OutboundMessage,
        /// Rendered immediately because the server does not echo it back.
        local_echo: Option<TranscriptEntry>,
    },
    /// A privileged command was parked; `notice` asks for the password.
    AwaitConfirmation { notice: TranscriptEntry },
}

impl Classification {
    /// Whether the input fields should be cleared after handling.
    pub fn consumes_input(&self) -> bool {
        !matches!(self, Classification::Nothing)
    }
}

pub fn is_privileged(input: &str) -> bool {
    PRIVILEGED_PREFIXES
        .iter()
        .any(|prefix| input.starts_with(prefix))
}

pub fn classify(input: &str, recipient: &str, pending: &mut Option<String>) -> Classification {
    if input.is_empty() {
        return Classification::Nothing;
    }

    if let Some(command) = pending.take() {
        return Classification::Send {
            message: OutboundMessage::Command {
                command,
                password: Some(input.to_string()),
            },
            local_echo: None,
        };
    }

    if !recipient.is_empty() {
        return Classification::Send {
            message: OutboundMessage::PrivateMessage {
                to: recipient.to_string(),
                content: input.to_string(),
            },
            local_echo: Some(TranscriptEntry::PrivateSent {
                to: recipient.to_string(),
                content: input.to_string(),
            }),
        };
    }

    if is_privileged(input) {
        *pending = Some(input.to_string());
        return Classification::AwaitConfirmation {
            notice: TranscriptEntry::System {
                content: PASSWORD_PROMPT.to_string(),
            },
        };
    }

    if input.starts_with('/') {
        return Classification::Send {
            message: OutboundMessage::Command {
                command: input.to_string(),
                password: None,
            },
            local_echo: None,
        };
    }

    Classification::Send {
        message: OutboundMessage::Message {
            message: input.to_string(),
        },
        local_echo: None,
    }
}
