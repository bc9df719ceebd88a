use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEPARATOR: &str = " • ";

/// Trims `text` to at most `max` columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Builds the window title. The server URL is the part that gives way when
/// space runs out.
pub fn build_title(server_url: &str, status: &str, available_width: usize) -> String {
    let base = format!("Palaver v{}", env!("CARGO_PKG_VERSION"));
    let fixed = UnicodeWidthStr::width(base.as_str())
        + UnicodeWidthStr::width(status)
        + 2 * UnicodeWidthStr::width(SEPARATOR);

    if fixed >= available_width {
        return truncate_to_width(&format!("{base}{SEPARATOR}{status}"), available_width);
    }

    let server = truncate_to_width(server_url, available_width - fixed);
    if server.is_empty() {
        return format!("{base}{SEPARATOR}{status}");
    }
    format!("{base}{SEPARATOR}{server}{SEPARATOR}{status}")
}
