//! WebSocket channel to the chat server.
//!
//! Each [`ConnectionManager::open`] call spawns one task that owns one
//! socket. The task reports what happens to it as [`TransportUpdate`]s,
//! tagged with the connection id it was opened with, so updates from an
//! abandoned channel can be told apart from the live one. There is no
//! retry: once a channel reports `Closed` it is finished.

use std::error::Error as StdError;
use std::fmt;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::protocol::{OutboundMessage, ProtocolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The handshake finished; frames can be sent.
    Opened,
    /// A text frame from the server.
    Frame(String),
    /// Connect or I/O failure. Always followed by `Closed`.
    Error(String),
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportUpdate {
    pub connection_id: u64,
    pub event: TransportEvent,
}

#[derive(Debug)]
pub enum TransportError {
    /// No live channel with this id.
    NotOpen { connection_id: u64 },
    Encode(ProtocolError),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::NotOpen { connection_id } => {
                write!(f, "Connection {connection_id} is not open")
            }
            TransportError::Encode(err) => write!(f, "{err}"),
        }
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TransportError::NotOpen { .. } => None,
            TransportError::Encode(err) => Some(err),
        }
    }
}

impl From<ProtocolError> for TransportError {
    fn from(err: ProtocolError) -> Self {
        TransportError::Encode(err)
    }
}

struct ActiveConnection {
    id: u64,
    outbound: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

pub struct ConnectionManager {
    events: mpsc::UnboundedSender<TransportUpdate>,
    active: Option<ActiveConnection>,
}

impl ConnectionManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TransportUpdate>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                events,
                active: None,
            },
            rx,
        )
    }

    pub fn active_id(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Starts a new channel, abandoning the previous one if any.
    pub fn open(&mut self, connection_id: u64, url: impl Into<String>) {
        self.abandon();

        let url = url.into();
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let events = self.events.clone();
        info!(connection_id, %url, "opening connection");
        let task = tokio::spawn(run_connection(connection_id, url, outbound_rx, events));
        self.active = Some(ActiveConnection {
            id: connection_id,
            outbound,
            task,
        });
    }

    /// Serializes and queues one frame. Fire-and-forget: success only means
    /// the frame reached the connection task.
    pub fn send(
        &self,
        connection_id: u64,
        message: &OutboundMessage,
    ) -> Result<(), TransportError> {
        let active = self
            .active
            .as_ref()
            .filter(|active| active.id == connection_id)
            .ok_or(TransportError::NotOpen { connection_id })?;
        let text = message.encode()?;
        debug!(connection_id, kind = message.kind(), "sending frame");
        active
            .outbound
            .send(text)
            .map_err(|_| TransportError::NotOpen { connection_id })
    }

    /// Drops the live channel without a closing handshake.
    pub fn abandon(&mut self) {
        if let Some(previous) = self.active.take() {
            debug!(connection_id = previous.id, "abandoning connection");
            previous.task.abort();
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.abandon();
    }
}

async fn run_connection(
    connection_id: u64,
    url: String,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<TransportUpdate>,
) {
    let emit = |event: TransportEvent| {
        let _ = events.send(TransportUpdate {
            connection_id,
            event,
        });
    };

    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(err) => {
            warn!(connection_id, error = %err, "connect failed");
            emit(TransportEvent::Error(err.to_string()));
            emit(TransportEvent::Closed);
            return;
        }
    };

    info!(connection_id, "connection open");
    emit(TransportEvent::Opened);

    let (mut sink, mut source) = stream.split();
    loop {
        tokio::select! {
            outgoing = outbound_rx.recv() => match outgoing {
                Some(text) => {
                    if let Err(err) = sink.send(Message::Text(text)).await {
                        warn!(connection_id, error = %err, "send failed");
                        emit(TransportEvent::Error(err.to_string()));
                        break;
                    }
                }
                None => break,
            },
            incoming = source.next() => match incoming {
                Some(Ok(Message::Text(text))) => emit(TransportEvent::Frame(text)),
                Some(Ok(Message::Close(frame))) => {
                    debug!(connection_id, ?frame, "server closed connection");
                    // Writes the close reply tungstenite queued on read.
                    if let Err(err) = sink.flush().await {
                        debug!(connection_id, error = %err, "close reply not sent");
                    }
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(connection_id, error = %err, "receive failed");
                    emit(TransportEvent::Error(err.to_string()));
                    break;
                }
                None => break,
            },
        }
    }

    info!(connection_id, "connection closed");
    emit(TransportEvent::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_without_open_channel_is_rejected() {
        let (manager, _rx) = ConnectionManager::new();
        let err = manager
            .send(
                3,
                &OutboundMessage::Message {
                    message: "hi".into(),
                },
            )
            .expect_err("no channel");
        assert!(matches!(err, TransportError::NotOpen { connection_id: 3 }));
        assert_eq!(err.to_string(), "Connection 3 is not open");
    }

    #[tokio::test]
    async fn send_to_abandoned_id_is_rejected() {
        let (mut manager, _rx) = ConnectionManager::new();
        manager.open(1, "ws://127.0.0.1:9");
        manager.open(2, "ws://127.0.0.1:9");
        assert_eq!(manager.active_id(), Some(2));
        let result = manager.send(
            1,
            &OutboundMessage::Message {
                message: "late".into(),
            },
        );
        assert!(matches!(
            result,
            Err(TransportError::NotOpen { connection_id: 1 })
        ));
    }
}
