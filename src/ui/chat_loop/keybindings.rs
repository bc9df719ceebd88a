//! Key routing for the login and chat views.
//!
//! Keys either become an [`AppAction`] or fall through to the focused text
//! field as an edit.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::core::app::{App, AppAction, InputField, View};

const PAGE_LINES: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    Action(AppAction),
    /// Forward the key to the focused text field.
    Edit,
    Ignored,
}

pub fn route_key(view: View, focus: InputField, key: &KeyEvent) -> KeyResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => KeyResult::Action(AppAction::Quit),
        KeyCode::Tab => KeyResult::Action(AppAction::FocusNext),
        KeyCode::Enter => match (view, focus) {
            (View::Login, InputField::Username) => KeyResult::Action(AppAction::FocusNext),
            (View::Login, _) => KeyResult::Action(AppAction::SubmitLogin),
            (View::Chat, _) => KeyResult::Action(AppAction::SubmitInput),
        },
        KeyCode::Char('p') if ctrl && view == View::Chat => {
            KeyResult::Action(AppAction::ToggleRecipient)
        }
        KeyCode::Esc if view == View::Chat => KeyResult::Action(AppAction::ReturnToLogin),
        KeyCode::PageUp if view == View::Chat => KeyResult::Action(AppAction::ScrollTranscript {
            lines: PAGE_LINES,
        }),
        KeyCode::PageDown if view == View::Chat => {
            KeyResult::Action(AppAction::ScrollTranscript { lines: -PAGE_LINES })
        }
        // Single-line fields: no newlines from the textarea.
        KeyCode::Char('m') | KeyCode::Char('j') if ctrl => KeyResult::Ignored,
        KeyCode::Char(_)
        | KeyCode::Backspace
        | KeyCode::Delete
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Home
        | KeyCode::End => KeyResult::Edit,
        _ => KeyResult::Ignored,
    }
}

/// Applies an edit key to whichever field has focus.
pub fn apply_edit(app: &mut App, key: KeyEvent) {
    app.ui.focused_textarea_mut().input(TAInput::from(key));
}

/// Pasted text goes into the focused field with line breaks flattened.
pub fn apply_paste(app: &mut App, text: &str) {
    let flattened: String = text
        .chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .filter(|ch| !ch.is_control())
        .collect();
    app.ui.focused_textarea_mut().insert_str(flattened);
}
