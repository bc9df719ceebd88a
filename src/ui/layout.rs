use ratatui::text::Line;
use unicode_width::UnicodeWidthChar;

use crate::core::message::TranscriptLine;
use crate::ui::theme::Theme;

/// Indent applied to content lines so they sit under their label.
pub const CONTENT_INDENT: &str = "  ";

/// Splits `text` into rows of at most `width` columns. Breaks prefer the
/// last space in the row and fall back to a hard cut.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;

    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if row_width + w > width && !row.is_empty() {
            match row.rfind(' ') {
                Some(split) if split > 0 => {
                    let rest = row[split + 1..].to_string();
                    row.truncate(split);
                    rows.push(std::mem::take(&mut row));
                    row_width = rest.chars().filter_map(UnicodeWidthChar::width).sum();
                    row = rest;
                }
                _ => {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
            }
        }
        if row.is_empty() && ch == ' ' && !rows.is_empty() {
            continue;
        }
        row.push(ch);
        row_width += w;
    }
    rows.push(row);
    rows
}

/// Styles and wraps the transcript for a pane `width` columns wide.
pub fn build_transcript_lines<'a>(
    transcript: impl IntoIterator<Item = &'a TranscriptLine>,
    theme: &Theme,
    width: u16,
) -> Vec<Line<'static>> {
    let width = usize::from(width);
    let mut lines = Vec::new();
    for entry in transcript {
        let style = theme.line_style(entry);
        if entry.is_label() {
            for row in wrap_text(&entry.text, width) {
                lines.push(Line::styled(row, style));
            }
        } else {
            let inner = width.saturating_sub(CONTENT_INDENT.len()).max(1);
            for row in wrap_text(&entry.text, inner) {
                lines.push(Line::styled(format!("{CONTENT_INDENT}{row}"), style));
            }
        }
    }
    lines
}

/// First row to show so the pane ends `scroll_from_bottom` rows above the
/// newest one.
pub fn scroll_offset(total_rows: usize, visible_rows: u16, scroll_from_bottom: u16) -> u16 {
    let max_offset = total_rows.saturating_sub(usize::from(visible_rows));
    let offset = max_offset.saturating_sub(usize::from(scroll_from_bottom));
    offset.min(usize::from(u16::MAX)) as u16
}
