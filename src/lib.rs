//! Palaver is a terminal client for a JSON-over-WebSocket group chat room.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`protocol`] defines the frames exchanged with the chat server.
//! - [`transport`] owns WebSocket connections and reports their lifecycle
//!   as tagged events.
//! - [`core`] holds the client state machine: input classification, inbound
//!   dispatch, transcript rendering, banners, and persisted configuration.
//! - [`ui`] renders the terminal interface and runs the event loop that feeds
//!   keyboard, socket, and timer events into [`core::app`].
//!
//! The binary entrypoint (`src/main.rs`) routes through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod logging;
pub mod protocol;
pub mod transport;
pub mod ui;
