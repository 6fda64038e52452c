use unicode_width::UnicodeWidthChar;

pub const CHOICE_WRAP_WIDTH: usize = 40;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Breaks `text` so that no line is wider than `max_width` display columns.
/// Wide glyphs (Hangul, CJK) count as two columns. Existing newlines are
/// kept and restart the count.
pub fn wrap_choice_text(text: &str, max_width: usize) -> String {
    let mut wrapped = String::with_capacity(text.len());
    let mut line_width = 0;

    for ch in text.chars() {
        if ch == '\n' {
            wrapped.push(ch);
            line_width = 0;
            continue;
        }
        let char_width = ch.width().unwrap_or(0);
        if line_width + char_width > max_width && line_width > 0 {
            wrapped.push('\n');
            line_width = 0;
        }
        wrapped.push(ch);
        line_width += char_width;
    }

    wrapped
}
