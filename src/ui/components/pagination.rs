//! Pagination strip component renderer.
//!
//! One line above the footer border: prev/next arrows, the visible page
//! numbers with the current page emphasized, jump shortcuts when the
//! window excludes the first or last page, and the match count.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders the pagination strip at the specified row.
///
/// Layout: ` Prev  1 .. 4 [5] 6 .. 12  Next        10 matches`.
/// Non-actionable prev/next are dimmed. Returns the next available row.
pub fn render_pagination(row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let control = &info.control;
    position_cursor(row, 1);

    let mut printed = 0;

    print!(" ");
    printed += 1;
    printed += render_edge("Prev", control.can_prev, theme);

    if control.show_first_jump {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  1");
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!(" ..");
        printed += 6;
    }

    for number in &control.numbers {
        if *number == control.page {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
            print!(" [{number}]");
            print!("{}", Theme::reset());
            printed += 3 + count_digits(*number);
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print!(" {number}");
            printed += 1 + count_digits(*number);
        }
    }

    if control.show_last_jump {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!(" ..");
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!(" {}", control.total_pages);
        printed += 4 + count_digits(control.total_pages);
    }

    print!("  ");
    printed += 2;
    printed += render_edge("Next", control.can_next, theme);

    let matches = match info.total {
        1 => "1 match".to_string(),
        n => format!("{n} matches"),
    };
    let matches_len = matches.chars().count();

    let gap = cols.saturating_sub(printed + matches_len + 1);
    print!("{}", " ".repeat(gap));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{matches} ");
    print!("{}", Theme::reset());

    row + 1
}

/// Renders a Prev/Next label, dimmed when not actionable.
///
/// Returns the number of characters printed.
fn render_edge(label: &str, actionable: bool, theme: &Theme) -> usize {
    if actionable {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{label}");
    print!("{}", Theme::reset());
    label.chars().count()
}

/// Decimal digit count of a page number, for width accounting.
fn count_digits(n: u32) -> usize {
    n.to_string().chars().count()
}
