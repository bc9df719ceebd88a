//! Terminal UI layer for the chat client.
//!
//! - [`chat_loop`]: the event loop that turns keys, socket updates, and
//!   banner expiries into actions on [`crate::core::app::App`].
//! - [`renderer`], [`layout`], and [`title`]: frame composition.
//! - [`theme`]: styles for transcript tones and chrome.
//!
//! This layer only presents and captures interaction state; protocol
//! decisions live in [`crate::core`].

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod title;
