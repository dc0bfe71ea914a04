//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple
//! UI components: cursor positioning and highlighted-text rendering for
//! search matches.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses the ANSI escape sequence `\x1b[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges for search matches.
///
/// Splits the text into highlighted and normal sections based on the
/// provided character ranges. Highlighted sections use the match highlight
/// colors unless the row is selected, in which case the selection colors
/// take precedence and highlighting is suppressed.
///
/// Ranges use character indices, not byte indices, with exclusive ends;
/// out-of-bounds ends are clamped.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end.min(chars.len())].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Wraps text to a maximum width on whitespace boundaries.
///
/// Words longer than the width are split hard. Used by the detail view to
/// fit description and step text to the terminal.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }

        // Hard-split words that cannot fit on any line.
        while current.chars().count() > width {
            let head: String = current.chars().take(width).collect();
            let tail: String = current.chars().skip(width).collect();
            lines.push(head);
            current = tail;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_word_boundaries() {
        let lines = wrap_text("simmer the sauce until thick", 12);
        assert_eq!(lines, vec!["simmer the", "sauce until", "thick"]);
    }

    #[test]
    fn wrap_hard_splits_overlong_words() {
        let lines = wrap_text("caramelization", 6);
        assert_eq!(lines, vec!["carame", "lizati", "on"]);
    }

    #[test]
    fn wrap_of_empty_text_yields_one_blank_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
