use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::app::{App, InputField, View};
use crate::core::banner::BannerScope;
use crate::ui::layout::{build_transcript_lines, scroll_offset};
use crate::ui::theme::Theme;
use crate::ui::title::{build_title, truncate_to_width};

const LOGIN_WIDTH: u16 = 48;
const FIELD_HEIGHT: u16 = 3;

pub fn ui(f: &mut Frame, app: &App) {
    let theme = Theme::default();
    match app.ui.view {
        View::Login => render_login(f, app, &theme),
        View::Chat => render_chat(f, app, &theme),
    }
}

fn field_title(field: InputField) -> &'static str {
    match field {
        InputField::Username => "Username",
        InputField::Password => "Password",
        InputField::Message => "Message (Enter to send, Ctrl+P for private, Ctrl+C to quit)",
        InputField::Recipient => "Private to (Ctrl+P to hide)",
    }
}

fn render_field(f: &mut Frame, app: &App, theme: &Theme, field: InputField, area: Rect) {
    let focused = app.ui.focus == field;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(field_title(field));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut textarea = app.ui.textarea(field).clone();
    textarea.set_style(theme.input_text_style);
    textarea.set_placeholder_style(theme.placeholder_style);
    textarea.set_cursor_line_style(Style::default());
    if focused {
        textarea.set_cursor_style(theme.input_cursor_style);
    } else {
        textarea.set_cursor_style(Style::default());
    }
    f.render_widget(&textarea, inner);
}

fn render_banner(f: &mut Frame, app: &App, theme: &Theme, scope: BannerScope, area: Rect) {
    if let Some(text) = app.ui.banners.text(scope) {
        let text = truncate_to_width(text, usize::from(area.width));
        f.render_widget(Paragraph::new(Line::styled(text, theme.banner_style)), area);
    }
}

fn render_login(f: &mut Frame, app: &App, theme: &Theme) {
    let area = f.area();
    let [column] = Layout::horizontal([Constraint::Length(LOGIN_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [_, title, username, password, banner, hint, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(column);

    let heading = truncate_to_width(
        &format!("Log in to {}", app.server_url),
        usize::from(title.width),
    );
    f.render_widget(Paragraph::new(Line::styled(heading, theme.title_style)), title);
    render_field(f, app, theme, InputField::Username, username);
    render_field(f, app, theme, InputField::Password, password);
    render_banner(f, app, theme, BannerScope::Login, banner);

    let status = if app.session.as_ref().is_some_and(|s| !s.is_closed()) {
        app.status_line()
    } else {
        "Enter to continue • Tab to switch fields • Ctrl+C to quit".to_string()
    };
    let status = truncate_to_width(&status, usize::from(hint.width));
    f.render_widget(Paragraph::new(Line::styled(status, theme.status_style)), hint);
}

fn render_chat(f: &mut Frame, app: &App, theme: &Theme) {
    let recipient_height = if app.ui.recipient_visible {
        FIELD_HEIGHT
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(recipient_height),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
        ])
        .split(f.area());

    let status = app.status_line();
    let title = build_title(&app.server_url, &status, usize::from(chunks[0].width));
    f.render_widget(Paragraph::new(Line::styled(title, theme.title_style)), chunks[0]);

    let transcript_area = chunks[1];
    let lines = build_transcript_lines(&app.ui.transcript, theme, transcript_area.width);
    let offset = scroll_offset(lines.len(), transcript_area.height, app.ui.scroll_from_bottom);
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), transcript_area);

    render_banner(f, app, theme, BannerScope::Chat, chunks[2]);
    if app.ui.recipient_visible {
        render_field(f, app, theme, InputField::Recipient, chunks[3]);
    }
    render_field(f, app, theme, InputField::Message, chunks[4]);

    let hint = if app.ui.is_message_masked() {
        "Enter the admin password to confirm"
    } else if app.ui.scroll_from_bottom > 0 {
        "Scrolled back • PageDown to return"
    } else {
        "PageUp/PageDown to scroll • Esc after disconnect to log in again"
    };
    let hint = truncate_to_width(hint, usize::from(chunks[5].width));
    f.render_widget(Paragraph::new(Line::styled(hint, theme.status_style)), chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::{apply_action, AppAction};
    use crate::transport::{TransportEvent, TransportUpdate};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn login_view_shows_form_and_masks_password() {
        let mut app = App::new("ws://127.0.0.1:9002", Some("alice"));
        app.ui.set_input_value(InputField::Password, "hunter2");
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Log in to ws://127.0.0.1:9002"));
        assert!(text.contains("alice"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("•••••••"));
    }

    #[test]
    fn chat_view_shows_transcript_and_banner() {
        let mut app = App::new("ws://chat.test", Some("alice"));
        apply_action(&mut app, AppAction::SubmitLogin);
        for event in [
            TransportEvent::Opened,
            TransportEvent::Frame(r#"{"type":"login","status":"success"}"#.into()),
            TransportEvent::Frame(
                r#"{"type":"message","username":"bob","content":"hello there"}"#.into(),
            ),
            TransportEvent::Frame(
                r#"{"type":"message","status":"error","message":"Slow down."}"#.into(),
            ),
        ] {
            apply_action(
                &mut app,
                AppAction::Transport(TransportUpdate {
                    connection_id: 1,
                    event,
                }),
            );
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Connected as alice"));
        assert!(text.contains("bob"));
        assert!(text.contains("  hello there"));
        assert!(text.contains("Slow down."));
        assert!(!text.contains("Private to"));
    }
}
