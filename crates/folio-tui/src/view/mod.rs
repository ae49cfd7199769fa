pub mod affordance;
pub mod help;
pub mod page;
pub mod quit_confirm;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut truncated = String::new();
    for c in s.chars() {
        let w = char_width(c);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(c);
    }
    truncated.push('\u{2026}');
    truncated
}

/// Keep the last `max_width` columns of `s`, prefixing "\u{2026}" if cut.
/// Used for input fields so the cursor end stays visible.
pub fn tail(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut kept = Vec::new();
    for c in s.chars().rev() {
        let w = char_width(c);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(c);
    }
    let mut out = String::from('\u{2026}');
    out.extend(kept.into_iter().rev());
    out
}

/// Split `word` into pieces no wider than `width` columns. A single glyph
/// wider than `width` gets a piece of its own.
fn split_word(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut used = 0;
    for c in word.chars() {
        let w = char_width(c);
        if used + w > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            used = 0;
        }
        piece.push(c);
        used += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Greedy word wrap measured in terminal columns. Words wider than `width`
/// are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for piece in split_word(word, width) {
            let piece_len = piece.width();
            let needed = if current_len == 0 {
                piece_len
            } else {
                current_len + 1 + piece_len
            };
            if needed > width && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Create a centered rectangle of the given width (columns) and height (rows).
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.width() <= 10));
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn wrap_empty_text() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn truncate_and_tail() {
        assert_eq!(truncate("hello world", 5), "hell\u{2026}");
        assert_eq!(truncate("hi", 5), "hi");
        assert_eq!(tail("hello world", 5), "\u{2026}orld");
        assert_eq!(tail("hi", 5), "hi");
    }

    #[test]
    fn wide_glyphs_measured_in_columns() {
        // Each ideograph takes two columns.
        let name = "\u{5C71}\u{7530}\u{592A}\u{90CE}";
        assert_eq!(name.width(), 8);

        let cut = tail(name, 5);
        assert_eq!(cut, "\u{2026}\u{592A}\u{90CE}");
        assert!(cut.width() <= 5);

        let cut = truncate(name, 6);
        assert_eq!(cut, "\u{5C71}\u{7530}\u{2026}");
        assert!(cut.width() <= 6);

        assert_eq!(tail(name, 8), name);
    }

    #[test]
    fn wrap_counts_columns_not_chars() {
        let lines = wrap("\u{5C71}\u{7530} \u{592A}\u{90CE}\u{5C71}", 5);
        assert!(lines.iter().all(|l| l.width() <= 5), "{lines:?}");
        assert_eq!(lines, vec!["\u{5C71}\u{7530}", "\u{592A}\u{90CE}", "\u{5C71}"]);
    }
}
