use std::collections::VecDeque;

use tui_textarea::TextArea;

use crate::core::banner::Banners;
use crate::core::constants::MAX_TRANSCRIPT_LINES;
use crate::core::message::TranscriptLine;

const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Username,
    Password,
    Message,
    Recipient,
}

impl InputField {
    fn placeholder(self) -> &'static str {
        match self {
            InputField::Username => "username",
            InputField::Password => "password",
            InputField::Message => "Type a message, /list, /kick <user>, /ban <user>",
            InputField::Recipient => "recipient (empty for everyone)",
        }
    }
}

fn new_field(field: InputField) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(field.placeholder());
    if field == InputField::Password {
        textarea.set_mask_char(MASK_CHAR);
    }
    textarea
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub view: View,
    pub focus: InputField,
    username: TextArea<'static>,
    password: TextArea<'static>,
    message: TextArea<'static>,
    recipient: TextArea<'static>,
    message_masked: bool,
    pub recipient_visible: bool,
    pub transcript: VecDeque<TranscriptLine>,
    /// Lines scrolled up from the bottom; 0 keeps the newest line in view.
    pub scroll_from_bottom: u16,
    pub banners: Banners,
    pub exit_requested: bool,
}

impl UiState {
    pub fn new(prefill_username: Option<&str>) -> Self {
        let mut ui = Self {
            view: View::Login,
            focus: InputField::Username,
            username: new_field(InputField::Username),
            password: new_field(InputField::Password),
            message: new_field(InputField::Message),
            recipient: new_field(InputField::Recipient),
            message_masked: false,
            recipient_visible: false,
            transcript: VecDeque::new(),
            scroll_from_bottom: 0,
            banners: Banners::default(),
            exit_requested: false,
        };
        if let Some(name) = prefill_username.filter(|name| !name.is_empty()) {
            ui.set_input_value(InputField::Username, name);
            ui.focus = InputField::Password;
        }
        ui
    }

    pub fn textarea(&self, field: InputField) -> &TextArea<'static> {
        match field {
            InputField::Username => &self.username,
            InputField::Password => &self.password,
            InputField::Message => &self.message,
            InputField::Recipient => &self.recipient,
        }
    }

    pub fn textarea_mut(&mut self, field: InputField) -> &mut TextArea<'static> {
        match field {
            InputField::Username => &mut self.username,
            InputField::Password => &mut self.password,
            InputField::Message => &mut self.message,
            InputField::Recipient => &mut self.recipient,
        }
    }

    pub fn focused_textarea_mut(&mut self) -> &mut TextArea<'static> {
        self.textarea_mut(self.focus)
    }

    pub fn input_value(&self, field: InputField) -> String {
        self.textarea(field).lines().join("\n")
    }

    pub fn set_input_value(&mut self, field: InputField, value: &str) {
        self.clear_input(field);
        self.textarea_mut(field).insert_str(value);
    }

    pub fn clear_input(&mut self, field: InputField) {
        let mut fresh = new_field(field);
        if field == InputField::Message && self.message_masked {
            fresh.set_mask_char(MASK_CHAR);
        }
        *self.textarea_mut(field) = fresh;
    }

    /// Masks the message input while it is collecting a confirmation
    /// password.
    pub fn set_message_masked(&mut self, masked: bool) {
        if self.message_masked == masked {
            return;
        }
        self.message_masked = masked;
        if masked {
            self.message.set_mask_char(MASK_CHAR);
        } else {
            self.message.clear_mask_char();
        }
    }

    pub fn is_message_masked(&self) -> bool {
        self.message_masked
    }

    pub fn enter_chat(&mut self) {
        self.view = View::Chat;
        self.focus = InputField::Message;
    }

    pub fn enter_login(&mut self) {
        self.view = View::Login;
        self.focus = if self.input_value(InputField::Username).is_empty() {
            InputField::Username
        } else {
            InputField::Password
        };
    }

    pub fn toggle_recipient(&mut self) {
        self.recipient_visible = !self.recipient_visible;
        if self.recipient_visible {
            self.focus = InputField::Recipient;
        } else if self.focus == InputField::Recipient {
            self.focus = InputField::Message;
        }
    }

    /// Moves focus to the next visible field of the current view.
    pub fn focus_next(&mut self) {
        self.focus = match (self.view, self.focus) {
            (View::Login, InputField::Username) => InputField::Password,
            (View::Login, _) => InputField::Username,
            (View::Chat, InputField::Message) if self.recipient_visible => InputField::Recipient,
            (View::Chat, _) => InputField::Message,
        };
    }

    /// Appends rendered lines and jumps back to the newest line.
    pub fn append_lines(&mut self, lines: impl IntoIterator<Item = TranscriptLine>) {
        self.transcript.extend(lines);
        while self.transcript.len() > MAX_TRANSCRIPT_LINES {
            self.transcript.pop_front();
        }
        self.scroll_from_bottom = 0;
    }

    pub fn scroll_by(&mut self, lines: i32) {
        let max = self.transcript.len().min(u16::MAX as usize) as u16;
        let next = i64::from(self.scroll_from_bottom) + i64::from(lines);
        self.scroll_from_bottom = next.clamp(0, i64::from(max)) as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Tone;

    #[test]
    fn prefilled_username_focuses_password() {
        let ui = UiState::new(Some("alice"));
        assert_eq!(ui.input_value(InputField::Username), "alice");
        assert_eq!(ui.focus, InputField::Password);

        let blank = UiState::new(None);
        assert_eq!(blank.focus, InputField::Username);
        assert_eq!(blank.view, View::Login);
    }

    #[test]
    fn clear_input_empties_field() {
        let mut ui = UiState::new(None);
        ui.set_input_value(InputField::Message, "hello");
        assert_eq!(ui.input_value(InputField::Message), "hello");
        ui.clear_input(InputField::Message);
        assert_eq!(ui.input_value(InputField::Message), "");
    }

    #[test]
    fn recipient_toggle_moves_focus() {
        let mut ui = UiState::new(None);
        ui.enter_chat();
        ui.toggle_recipient();
        assert!(ui.recipient_visible);
        assert_eq!(ui.focus, InputField::Recipient);
        ui.toggle_recipient();
        assert!(!ui.recipient_visible);
        assert_eq!(ui.focus, InputField::Message);
    }

    #[test]
    fn focus_cycles_within_view() {
        let mut ui = UiState::new(None);
        ui.focus_next();
        assert_eq!(ui.focus, InputField::Password);
        ui.focus_next();
        assert_eq!(ui.focus, InputField::Username);

        ui.enter_chat();
        ui.focus_next();
        assert_eq!(ui.focus, InputField::Message);
        ui.recipient_visible = true;
        ui.focus_next();
        assert_eq!(ui.focus, InputField::Recipient);
        ui.focus_next();
        assert_eq!(ui.focus, InputField::Message);
    }

    #[test]
    fn transcript_is_capped_oldest_first() {
        let mut ui = UiState::new(None);
        ui.append_lines(
            (0..MAX_TRANSCRIPT_LINES + 3)
                .map(|i| TranscriptLine::content(Tone::Peer, i.to_string())),
        );
        assert_eq!(ui.transcript.len(), MAX_TRANSCRIPT_LINES);
        assert_eq!(ui.transcript.front().map(|l| l.text.as_str()), Some("3"));
    }

    #[test]
    fn scrolling_is_clamped_and_reset_by_new_lines() {
        let mut ui = UiState::new(None);
        ui.append_lines((0..10).map(|i| TranscriptLine::content(Tone::Peer, i.to_string())));
        ui.scroll_by(50);
        assert_eq!(ui.scroll_from_bottom, 10);
        ui.scroll_by(-4);
        assert_eq!(ui.scroll_from_bottom, 6);
        ui.scroll_by(-40);
        assert_eq!(ui.scroll_from_bottom, 0);
        ui.scroll_by(3);
        ui.append_lines([TranscriptLine::content(Tone::Peer, "new")]);
        assert_eq!(ui.scroll_from_bottom, 0);
    }

    #[test]
    fn masking_survives_clear() {
        let mut ui = UiState::new(None);
        ui.set_message_masked(true);
        ui.clear_input(InputField::Message);
        assert!(ui.is_message_masked());
        assert_eq!(ui.textarea(InputField::Message).mask_char(), Some(MASK_CHAR));
        ui.set_message_masked(false);
        assert_eq!(ui.textarea(InputField::Message).mask_char(), None);
    }
}
