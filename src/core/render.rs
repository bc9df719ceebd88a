//! Turns chat events into transcript lines.
//!
//! A sender label is only re-emitted when the sender changes, so runs of
//! messages from one person read as a single block. Broadcast and private
//! traffic keep separate cursors; interleaving a private exchange with
//! broadcast chatter must not hide a label either stream needs.
//!
//! One rule crosses streams: a private message the user sends moves the
//! broadcast cursor to the user, so "things I just sent" stay one block
//! whether they went to the room or to one person.

use crate::core::constants::SYSTEM_LABEL;
use crate::core::message::{Tone, TranscriptLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    Broadcast { username: String, content: String },
    PrivateSent { to: String, content: String },
    PrivateReceived { from: String, content: String },
    System { content: String },
    Roster { users: Vec<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    broadcast_cursor: Option<String>,
    private_cursor: Option<String>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcast_cursor(&self) -> Option<&str> {
        self.broadcast_cursor.as_deref()
    }

    pub fn private_cursor(&self) -> Option<&str> {
        self.private_cursor.as_deref()
    }

    pub fn render(&mut self, entry: &TranscriptEntry, self_name: &str) -> Vec<TranscriptLine> {
        let mut lines = Vec::with_capacity(2);
        match entry {
            TranscriptEntry::Broadcast { username, content } => {
                let tone = if username == self_name {
                    Tone::Own
                } else {
                    Tone::Peer
                };
                if self.broadcast_cursor.as_deref() != Some(username.as_str()) {
                    lines.push(TranscriptLine::label(tone, username.clone()));
                    self.broadcast_cursor = Some(username.clone());
                }
                lines.push(TranscriptLine::content(tone, content.clone()));
            }
            TranscriptEntry::PrivateSent { to, content } => {
                lines.push(TranscriptLine::label(Tone::Own, format!("to {to}")));
                lines.push(TranscriptLine::content(Tone::Own, content.clone()));
                self.broadcast_cursor = Some(self_name.to_string());
                self.private_cursor = None;
            }
            TranscriptEntry::PrivateReceived { from, content } => {
                if self.private_cursor.as_deref() != Some(from.as_str()) {
                    lines.push(TranscriptLine::label(Tone::Private, format!("{from} to me")));
                    self.private_cursor = Some(from.clone());
                }
                lines.push(TranscriptLine::content(Tone::Private, content.clone()));
            }
            TranscriptEntry::System { content } => {
                lines.push(TranscriptLine::label(Tone::System, SYSTEM_LABEL));
                lines.push(TranscriptLine::content(Tone::System, content.clone()));
            }
            TranscriptEntry::Roster { users } => {
                lines.push(TranscriptLine::label(Tone::System, SYSTEM_LABEL));
                lines.push(TranscriptLine::content(
                    Tone::System,
                    format!("Online users: {}", users.join(", ")),
                ));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::LineKind;

    fn broadcast(username: &str, content: &str) -> TranscriptEntry {
        TranscriptEntry::Broadcast {
            username: username.into(),
            content: content.into(),
        }
    }

    fn received(from: &str, content: &str) -> TranscriptEntry {
        TranscriptEntry::PrivateReceived {
            from: from.into(),
            content: content.into(),
        }
    }

    fn labels(lines: &[TranscriptLine]) -> Vec<&str> {
        lines
            .iter()
            .filter(|line| line.is_label())
            .map(|line| line.text.as_str())
            .collect()
    }

    #[test]
    fn consecutive_broadcasts_share_one_label() {
        let mut state = RenderState::new();
        let mut lines = Vec::new();
        lines.extend(state.render(&broadcast("bob", "one"), "alice"));
        lines.extend(state.render(&broadcast("bob", "two"), "alice"));
        assert_eq!(lines.len(), 3);
        assert_eq!(labels(&lines), vec!["bob"]);

        lines.extend(state.render(&broadcast("carol", "three"), "alice"));
        assert_eq!(labels(&lines), vec!["bob", "carol"]);
        assert_eq!(state.broadcast_cursor(), Some("carol"));
    }

    #[test]
    fn own_broadcasts_use_own_tone() {
        let mut state = RenderState::new();
        let lines = state.render(&broadcast("alice", "hi all"), "alice");
        assert!(lines.iter().all(|line| line.tone == Tone::Own));
        let lines = state.render(&broadcast("bob", "hey"), "alice");
        assert!(lines.iter().all(|line| line.tone == Tone::Peer));
    }

    #[test]
    fn sent_private_always_relabels() {
        let mut state = RenderState::new();
        let sent = TranscriptEntry::PrivateSent {
            to: "bob".into(),
            content: "hi".into(),
        };
        let first = state.render(&sent, "alice");
        let second = state.render(&sent, "alice");
        assert_eq!(labels(&first), vec!["to bob"]);
        assert_eq!(labels(&second), vec!["to bob"]);
        assert_eq!(first[1].kind, LineKind::Content);
        assert_eq!(first[1].text, "hi");
    }

    #[test]
    fn sent_private_continues_own_broadcast_block() {
        let mut state = RenderState::new();
        state.render(
            &TranscriptEntry::PrivateSent {
                to: "bob".into(),
                content: "psst".into(),
            },
            "alice",
        );
        let lines = state.render(&broadcast("alice", "hello room"), "alice");
        assert!(labels(&lines).is_empty());
    }

    #[test]
    fn received_privates_group_by_sender() {
        let mut state = RenderState::new();
        let mut lines = Vec::new();
        lines.extend(state.render(&received("bob", "a"), "alice"));
        lines.extend(state.render(&received("bob", "b"), "alice"));
        lines.extend(state.render(&received("carol", "c"), "alice"));
        assert_eq!(labels(&lines), vec!["bob to me", "carol to me"]);
        assert!(lines.iter().all(|line| line.tone == Tone::Private));
    }

    #[test]
    fn private_traffic_does_not_hide_broadcast_labels() {
        let mut state = RenderState::new();
        let mut lines = Vec::new();
        lines.extend(state.render(&received("bob", "secret"), "alice"));
        lines.extend(state.render(&broadcast("bob", "public"), "alice"));
        lines.extend(state.render(&received("bob", "secret again"), "alice"));
        assert_eq!(labels(&lines), vec!["bob to me", "bob"]);
    }

    #[test]
    fn system_entries_always_label_and_keep_cursors() {
        let mut state = RenderState::new();
        state.render(&broadcast("bob", "x"), "alice");
        let first = state.render(
            &TranscriptEntry::System {
                content: "User kicked.".into(),
            },
            "alice",
        );
        let second = state.render(
            &TranscriptEntry::System {
                content: "User banned.".into(),
            },
            "alice",
        );
        assert_eq!(labels(&first), vec![SYSTEM_LABEL]);
        assert_eq!(labels(&second), vec![SYSTEM_LABEL]);
        assert_eq!(state.broadcast_cursor(), Some("bob"));
    }

    #[test]
    fn roster_joins_users_in_order() {
        let mut state = RenderState::new();
        let lines = state.render(
            &TranscriptEntry::Roster {
                users: vec!["a".into(), "b".into(), "c".into()],
            },
            "alice",
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, SYSTEM_LABEL);
        assert_eq!(lines[1].text, "Online users: a, b, c");
        assert_eq!(lines[1].tone, Tone::System);
    }
}
