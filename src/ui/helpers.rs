//! Shared rendering utilities and helpers.
//!
//! Low-level helpers used across the UI components: cursor placement, fuzzy
//! match highlighting, and character-safe text fitting. Everything that
//! measures text counts `char`s, not bytes, so Korean names and reminder text
//! never split inside a code point.
//!
//! # Example
//!
//! ```rust
//! use rentdesk::ui::helpers::{truncate, wrap_text};
//!
//! assert_eq!(truncate("Wireless projector", 8), "Wireles…");
//! assert_eq!(wrap_text("rent the tent", 8), vec!["rent the", "tent"]);
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. When
/// `is_selected` is true the plain text is printed so the selection
/// background stays intact.
///
/// `restore` is printed after every highlighted section to return to the
/// row's own color.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool, restore: &str) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max_chars` characters, ending in `…` when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if char_len(text) <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max_chars - 1).collect();
    cut.push('…');
    cut
}

/// Left-aligns `text` in a column of `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let fitted = truncate(text, width);
    let fill = width.saturating_sub(char_len(&fitted));
    format!("{fitted}{}", " ".repeat(fill))
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = char_len(&current);
        if current.is_empty() {
            current = word.into_iter().collect();
        } else if current_len + 1 + word.len() <= width {
            current.push(' ');
            current.extend(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.into_iter().collect()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Tent", 10), "Tent");
        assert_eq!(truncate("블루투스 스피커", 4), "블루투…");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad("Tent", 6), "Tent  ");
        assert_eq!(char_len(&pad("카메라", 5)), 5);
        assert_eq!(pad("Wireless projector", 5), "Wire…");
    }

    #[test]
    fn wrap_breaks_on_words() {
        let lines = wrap_text("Kim Cheolsu, the return date for your rented speaker is 2026-10-18.", 20);
        assert!(lines.iter().all(|line| char_len(line) <= 20));
        assert_eq!(lines.join(" "), "Kim Cheolsu, the return date for your rented speaker is 2026-10-18.");
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
        assert!(wrap_text("   ", 10).is_empty());
    }
}
