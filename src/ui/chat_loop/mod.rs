//! Event loop for the interactive client.
//!
//! One task owns the [`App`]. Terminal input, socket updates, and banner
//! expiries arrive on separate channels; each becomes an [`AppAction`] that
//! is applied to completion before the next is read, and the resulting
//! [`AppCommand`]s are executed against the connection manager and timers.

pub mod keybindings;
pub mod lifecycle;

use std::{error::Error, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::app::{apply_action, App, AppAction, AppCommand};
use crate::core::banner::BannerTimers;
use crate::transport::ConnectionManager;
use crate::ui::renderer::ui;

use keybindings::{apply_edit, apply_paste, route_key, KeyResult};
use lifecycle::{restore_terminal, setup_terminal};

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Applies text edits in place and returns the action a key maps to, if any.
fn handle_terminal_event(app: &mut App, event: Event) -> Option<AppAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            match route_key(app.ui.view, app.ui.focus, &key) {
                KeyResult::Action(action) => Some(action),
                KeyResult::Edit => {
                    apply_edit(app, key);
                    None
                }
                KeyResult::Ignored => None,
            }
        }
        Event::Paste(text) => {
            apply_paste(app, &text);
            None
        }
        _ => None,
    }
}

fn execute_commands(
    connections: &mut ConnectionManager,
    timers: &mut BannerTimers,
    commands: Vec<AppCommand>,
) {
    for command in commands {
        match command {
            AppCommand::Connect { connection_id, url } => connections.open(connection_id, url),
            AppCommand::Send {
                connection_id,
                message,
            } => {
                if let Err(err) = connections.send(connection_id, &message) {
                    warn!(connection_id, kind = message.kind(), error = %err, "send dropped");
                }
            }
            AppCommand::ScheduleBannerClear {
                scope,
                ticket,
                after,
            } => timers.schedule(scope, ticket, after),
        }
    }
}

pub async fn run_chat(server_url: String, username: Option<String>) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(server_url, username.as_deref());
    let (mut connections, mut transport_rx) = ConnectionManager::new();
    let (mut timers, mut expiry_rx) = BannerTimers::new();

    let mut terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let result: Result<(), Box<dyn Error>> = loop {
        if app.ui.exit_requested {
            break Ok(());
        }
        if let Err(err) = terminal.draw(|f| ui(f, &app)) {
            break Err(err.into());
        }

        let action = tokio::select! {
            Some(UiEvent::Crossterm(ev)) = event_rx.recv() => handle_terminal_event(&mut app, ev),
            Some(update) = transport_rx.recv() => Some(AppAction::Transport(update)),
            Some(expiry) = expiry_rx.recv() => Some(AppAction::ClearBanner {
                scope: expiry.scope,
                ticket: expiry.ticket,
            }),
            else => break Ok(()),
        };

        if let Some(action) = action {
            debug!(?action, "applying action");
            let commands = apply_action(&mut app, action);
            execute_commands(&mut connections, &mut timers, commands);
        }
    };

    event_reader_handle.abort();
    connections.abandon();
    timers.cancel_all();
    restore_terminal(&mut terminal)?;
    info!("chat client exited");

    result
}
