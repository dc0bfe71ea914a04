//! Empty state component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message starting at the specified row.
///
/// Shown in place of the listing table when the catalog has nothing to
/// display: either no recipes are loaded yet or no recipe matches the
/// current filters. Both lines are horizontally centered; the message uses
/// the `empty_state_fg` theme color and the subtitle is dimmed. Returns the
/// next available row.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let msg_len = empty.message.chars().count();
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", empty.message);
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let sub_len = empty.subtitle.chars().count();
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(row + 2, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{}", empty.subtitle);
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());

    row + 3
}
