//! Filter bar component renderer.
//!
//! Two lines below the header: the active facet filters and, under them,
//! the raw query string backing the current selection. The query string
//! line is the shareable form of the whole selection: pasting it back
//! into a config or another session reproduces the exact listing.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the filter bar at the specified row.
///
/// Active filter values (anything other than "All"/"Any") use the accent
/// color so the eye can find the narrowing criteria. Returns the next
/// available row (row + 2).
pub fn render_filter_bar(row: usize, filters: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(" ");

    let mut printed = 1;
    printed += render_filter(" Cuisine: ", &filters.cuisine, "All", theme);
    printed += render_filter("  Course: ", &filters.course, "All", theme);
    printed += render_filter("  Diet: ", &filters.diet, "All", theme);
    printed += render_filter("  Max time: ", &filters.max_time, "Any", theme);

    print!("{}", " ".repeat(cols.saturating_sub(printed)));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    let permalink = if filters.query_string.is_empty() {
        " ?".to_string()
    } else {
        format!(" ?{}", filters.query_string)
    };
    let shown: String = permalink.chars().take(cols).collect();
    let shown_len = shown.chars().count();
    print!("{shown}");
    print!("{}", " ".repeat(cols.saturating_sub(shown_len)));
    print!("{}", Theme::reset());

    row + 2
}

/// Renders one labeled filter value, accenting non-default values.
///
/// Returns the number of characters printed.
fn render_filter(label: &str, value: &str, unfiltered: &str, theme: &Theme) -> usize {
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{label}");

    if value == unfiltered {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }
    print!("{value}");

    label.chars().count() + value.chars().count()
}
