use ratatui::style::{Color, Modifier, Style};

use crate::core::message::{LineKind, Tone, TranscriptLine};

#[derive(Debug, Clone)]
pub struct Theme {
    // Transcript styles, one pair per tone
    pub own_label_style: Style,
    pub own_text_style: Style,
    pub peer_label_style: Style,
    pub peer_text_style: Style,
    pub private_label_style: Style,
    pub private_text_style: Style,
    pub system_label_style: Style,
    pub system_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub status_style: Style,
    pub banner_style: Style,
    pub input_border_style: Style,
    pub focused_border_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub placeholder_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            own_label_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            own_text_style: Style::default().fg(Color::Cyan),
            peer_label_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            peer_text_style: Style::default().fg(Color::White),
            private_label_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            private_text_style: Style::default().fg(Color::LightMagenta),
            system_label_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            system_text_style: Style::default().fg(Color::DarkGray),

            title_style: Style::default().fg(Color::Gray),
            status_style: Style::default().fg(Color::DarkGray),
            banner_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            input_border_style: Style::default().fg(Color::DarkGray),
            focused_border_style: Style::default().fg(Color::Cyan),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            placeholder_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn line_style(&self, line: &TranscriptLine) -> Style {
        match (line.tone, line.kind) {
            (Tone::Own, LineKind::Label) => self.own_label_style,
            (Tone::Own, LineKind::Content) => self.own_text_style,
            (Tone::Peer, LineKind::Label) => self.peer_label_style,
            (Tone::Peer, LineKind::Content) => self.peer_text_style,
            (Tone::Private, LineKind::Label) => self.private_label_style,
            (Tone::Private, LineKind::Content) => self.private_text_style,
            (Tone::System, LineKind::Label) => self.system_label_style,
            (Tone::System, LineKind::Content) => self.system_text_style,
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.focused_border_style
        } else {
            self.input_border_style
        }
    }
}
