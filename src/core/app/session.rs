use crate::core::render::RenderState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    /// Closed or failed. The session cannot be used again.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Client-side state for one login attempt and the channel it opened.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    pub connection_id: u64,
    pub channel: ChannelState,
    /// Held until the channel opens and the login frame goes out.
    pub pending_credentials: Option<Credentials>,
    /// A `/kick` or `/ban` waiting for its confirmation password.
    pub pending_command: Option<String>,
    pub render: RenderState,
}

impl Session {
    pub fn new(connection_id: u64, credentials: Credentials) -> Self {
        Self {
            username: credentials.username.clone(),
            connection_id,
            channel: ChannelState::Connecting,
            pending_credentials: Some(credentials),
            pending_command: None,
            render: RenderState::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_open(&self) -> bool {
        self.channel == ChannelState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.channel == ChannelState::Closed
    }

    pub fn mark_closed(&mut self) {
        self.channel = ChannelState::Closed;
        self.pending_credentials = None;
    }
}
