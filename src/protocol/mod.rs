//! Wire schema for the chat service.
//!
//! Every frame is a JSON object carried in a WebSocket text message. The
//! client sends [`OutboundMessage`]s and recognizes a closed set of
//! [`InboundMessage`]s. Server frames are loosely shaped (the same `type`
//! tag shows up both as a full payload and as a bare `status`/`message`
//! acknowledgment), so decoding goes through [`RawFrame`], where every
//! field is optional, and a single classification pass decides which
//! variant, if any, the frame is.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// Acknowledgment the server sends after `/list`. The roster itself arrives
/// separately as `user_list`, so the acknowledgment is never rendered.
pub const USER_LIST_ACK: &str = "User list sent.";

/// Frames the client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Login {
        username: String,
        password: String,
    },
    Message {
        message: String,
    },
    PrivateMessage {
        to: String,
        content: String,
    },
    Command {
        command: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
}

impl OutboundMessage {
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Short tag used in log lines. Never includes credentials.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::Login { .. } => "login",
            OutboundMessage::Message { .. } => "message",
            OutboundMessage::PrivateMessage { .. } => "private_message",
            OutboundMessage::Command { .. } => "command",
        }
    }
}

/// Frames the client knows how to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    LoginSucceeded {
        message: Option<String>,
    },
    LoginFailed {
        message: Option<String>,
    },
    Broadcast {
        username: String,
        content: String,
    },
    Private {
        from: String,
        to: Option<String>,
        content: String,
    },
    UserList {
        users: Vec<String>,
    },
    /// Any non-login response carrying `status: "error"`.
    Error {
        message: Option<String>,
    },
    /// Feedback for an administrative command.
    CommandFeedback {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseStatus {
    Success,
    Error,
}

impl ResponseStatus {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(ResponseStatus::Success),
            "error" => Some(ResponseStatus::Error),
            _ => None,
        }
    }
}

/// Permissive view of a server frame. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RawFrame {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub users: Option<Vec<String>>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl InboundMessage {
    /// Decodes one text frame. Anything malformed or unrecognized is `None`.
    pub fn decode(text: &str) -> Option<Self> {
        match serde_json::from_str::<RawFrame>(text) {
            Ok(raw) => Self::classify(&raw),
            Err(err) => {
                tracing::debug!(error = %err, "dropping undecodable frame");
                None
            }
        }
    }

    /// First match wins; the order matters because response frames reuse
    /// the request tags.
    pub fn classify(raw: &RawFrame) -> Option<Self> {
        let kind = raw.kind.as_deref();
        let status = raw.status.as_deref().and_then(ResponseStatus::parse);

        if kind == Some("login") {
            return match status {
                Some(ResponseStatus::Success) => Some(InboundMessage::LoginSucceeded {
                    message: raw.message.clone(),
                }),
                Some(ResponseStatus::Error) => Some(InboundMessage::LoginFailed {
                    message: raw.message.clone(),
                }),
                None => None,
            };
        }

        if kind == Some("message") {
            let username = present(&raw.username);
            let content = present(&raw.content);
            if let (Some(username), Some(content)) = (username, content) {
                return Some(InboundMessage::Broadcast {
                    username: username.to_owned(),
                    content: content.to_owned(),
                });
            }
        }

        if kind == Some("private_message") {
            if let (Some(from), Some(content)) = (present(&raw.from), present(&raw.content)) {
                return Some(InboundMessage::Private {
                    from: from.to_owned(),
                    to: present(&raw.to).map(str::to_owned),
                    content: content.to_owned(),
                });
            }
        }

        if kind == Some("user_list") {
            if let Some(users) = &raw.users {
                return Some(InboundMessage::UserList {
                    users: users.clone(),
                });
            }
        }

        if status == Some(ResponseStatus::Error) {
            return Some(InboundMessage::Error {
                message: raw.message.clone(),
            });
        }

        if kind == Some("command") {
            if let Some(message) = present(&raw.message) {
                return Some(InboundMessage::CommandFeedback {
                    message: message.to_owned(),
                });
            }
        }

        None
    }
}

#[derive(Debug)]
pub enum ProtocolError {
    Encode(serde_json::Error),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Encode(err) => write!(f, "Failed to encode frame: {err}"),
        }
    }
}

impl StdError for ProtocolError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ProtocolError::Encode(err) => Some(err),
        }
    }
}
