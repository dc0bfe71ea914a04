//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar with match count
//! - [`footer`]: Help text and keybinding hints
//! - [`search`]: Search input box (border, live term)
//! - [`filters`]: Active filters and the query-string permalink
//! - [`table`]: Recipe listing with columns
//! - [`pagination`]: Page numbers, jumps, and prev/next
//! - [`detail`]: Scrollable full-recipe body
//! - [`empty`]: Empty state message
//!
//! # Layout modes
//!
//! Two high-level layout functions compose the components:
//!
//! - [`render_listing_mode`]: Header + filters (+ search bar) + table (or
//!   empty state) + pagination + footer
//! - [`render_detail_mode`]: Header + detail body + footer

mod detail;
mod empty;
mod filters;
mod footer;
mod header;
mod pagination;
mod search;
mod table;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use filters::render_filter_bar;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/body, body/footer). Returns the
/// next available row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    crate::ui::helpers::position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the listing layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines, search mode only]
/// [Filter Bar - 2 lines]
/// [Table Headers]
/// [Table Rows | Empty State]
/// [Blank padding]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
pub fn render_listing_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(filters) = &vm.filter_bar {
        current_row = render_filter_bar(current_row, filters, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme);
        let available = pagination_row.saturating_sub(current_row);
        let visible = &vm.display_rows[..vm.display_rows.len().min(available)];
        render_table_rows(current_row, visible, theme, cols);
    }

    if let Some(pagination) = &vm.pagination {
        render_pagination(pagination_row, pagination, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Renders the detail layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header - recipe title]
/// [Border]
/// [Detail body, scrolled]
/// [Border]
/// [Footer]
/// ```
pub fn render_detail_mode(
    vm: &UIViewModel,
    detail: &DetailView,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let available = border_row.saturating_sub(current_row);

    render_detail(current_row, detail, theme, cols, available);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
