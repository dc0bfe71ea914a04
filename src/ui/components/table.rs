//! Listing table component renderer.
//!
//! Renders the current page of recipes as a six-column table (TITLE,
//! CUISINE, COURSE, DIET, TIME, RATING) with selection highlighting and
//! search-match highlighting on the title column.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayRow;

/// Fixed column widths, excluding the single separating space.
const TITLE_WIDTH: usize = 30;
const CUISINE_WIDTH: usize = 12;
const COURSE_WIDTH: usize = 10;
const DIET_WIDTH: usize = 12;
const TIME_WIDTH: usize = 8;

/// Renders the table column headers at the specified row.
///
/// Returns the next available row.
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<TITLE_WIDTH$} {:<CUISINE_WIDTH$} {:<COURSE_WIDTH$} {:<DIET_WIDTH$} {:<TIME_WIDTH$} {}",
        "TITLE", "CUISINE", "COURSE", "DIET", "TIME", "RATING"
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows of the current page window starting at the given row.
///
/// Returns the next available row.
pub fn render_table_rows(row: usize, rows: &[DisplayRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in rows {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single table row.
///
/// Selection takes a full-width background; search matches highlight title
/// characters unless the row is selected. Returns the next available row.
fn render_table_row(row: usize, item: &DisplayRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    if item.highlight_ranges.is_empty() {
        print!("{}", item.title);
    } else {
        helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    }

    let title_len = item.title.chars().count().min(TITLE_WIDTH);
    print!("{}", " ".repeat(TITLE_WIDTH + 1 - title_len));

    let rest = format!(
        "{:<CUISINE_WIDTH$} {:<COURSE_WIDTH$} {:<DIET_WIDTH$} {:<TIME_WIDTH$} ",
        clip(&item.cuisine, CUISINE_WIDTH),
        clip(&item.course, COURSE_WIDTH),
        clip(&item.diet, DIET_WIDTH),
        clip(&item.time, TIME_WIDTH),
    );
    print!("{rest}");

    if item.is_selected || item.rating.is_empty() {
        print!("{}", item.rating);
    } else {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
        print!("{}", item.rating);
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let line_len = TITLE_WIDTH + 1 + rest.chars().count() + item.rating.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Truncates a value to its column width.
fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        value.chars().take(width).collect()
    }
}
