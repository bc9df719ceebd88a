//! Transient one-line notices.
//!
//! There is one banner per scope. Showing a new banner overwrites the old
//! one and cancels its pending clear; every banner instance carries a
//! ticket so a clear that races a newer banner is ignored.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerScope {
    /// Shown under the login form.
    Login,
    /// Shown above the message input.
    Chat,
}

#[derive(Debug, Clone, Default)]
struct BannerSlot {
    text: Option<String>,
    ticket: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Banners {
    login: BannerSlot,
    chat: BannerSlot,
    next_ticket: u64,
}

impl Banners {
    fn slot_mut(&mut self, scope: BannerScope) -> &mut BannerSlot {
        match scope {
            BannerScope::Login => &mut self.login,
            BannerScope::Chat => &mut self.chat,
        }
    }

    fn slot(&self, scope: BannerScope) -> &BannerSlot {
        match scope {
            BannerScope::Login => &self.login,
            BannerScope::Chat => &self.chat,
        }
    }

    /// Replaces the banner in `scope` and returns the new instance's ticket.
    pub fn show(&mut self, scope: BannerScope, text: impl Into<String>) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let slot = self.slot_mut(scope);
        slot.text = Some(text.into());
        slot.ticket = ticket;
        ticket
    }

    /// Clears the banner only if `ticket` still names the visible instance.
    pub fn clear(&mut self, scope: BannerScope, ticket: u64) -> bool {
        let slot = self.slot_mut(scope);
        if slot.ticket != ticket || slot.text.is_none() {
            return false;
        }
        slot.text = None;
        true
    }

    pub fn text(&self, scope: BannerScope) -> Option<&str> {
        self.slot(scope).text.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerExpiry {
    pub scope: BannerScope,
    pub ticket: u64,
}

/// Runs the auto-clear timers. Expiries are reported on a channel so the
/// event loop can feed them back in as actions.
pub struct BannerTimers {
    tx: mpsc::UnboundedSender<BannerExpiry>,
    login: Option<CancellationToken>,
    chat: Option<CancellationToken>,
}

impl BannerTimers {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BannerExpiry>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                login: None,
                chat: None,
            },
            rx,
        )
    }

    fn token_mut(&mut self, scope: BannerScope) -> &mut Option<CancellationToken> {
        match scope {
            BannerScope::Login => &mut self.login,
            BannerScope::Chat => &mut self.chat,
        }
    }

    /// Cancels the scope's pending clear and schedules a new one.
    pub fn schedule(&mut self, scope: BannerScope, ticket: u64, after: Duration) {
        let token = CancellationToken::new();
        if let Some(previous) = self.token_mut(scope).replace(token.clone()) {
            previous.cancel();
        }

        let deadline = Instant::now() + after;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    let _ = tx.send(BannerExpiry { scope, ticket });
                }
            }
        });
    }

    pub fn cancel_all(&mut self) {
        for token in [self.login.take(), self.chat.take()].into_iter().flatten() {
            token.cancel();
        }
    }
}

impl Drop for BannerTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
