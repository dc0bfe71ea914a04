//! Detail view component renderer.
//!
//! Flattens a [`DetailView`] into styled lines (description, meta, tags,
//! ingredients, steps, nutrition, gallery), then renders the slice selected
//! by the scroll offset. Wrapping happens here because only the renderer
//! knows the terminal width.

use crate::ui::helpers::{position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

/// Left margin for detail body text.
const MARGIN: usize = 2;

/// One styled line of the detail body.
struct Line {
    text: String,
    style: LineStyle,
}

/// Styling classes for detail body lines.
enum LineStyle {
    /// Normal body text.
    Text,
    /// Section headings ("Ingredients", "Steps", ...).
    Section,
    /// Secondary information (meta line, gallery refs).
    Dim,
    /// Tag line.
    Accent,
}

/// Renders the detail body between `row` and `row + available_rows`.
///
/// The scroll offset is clamped so the last page of lines stays reachable
/// but the view never scrolls past the end. Returns the next available row.
pub fn render_detail(
    row: usize,
    detail: &DetailView,
    theme: &Theme,
    cols: usize,
    available_rows: usize,
) -> usize {
    let width = cols.saturating_sub(MARGIN * 2).max(20);
    let lines = build_lines(detail, width);

    let max_scroll = lines.len().saturating_sub(available_rows);
    let scroll = detail.scroll.min(max_scroll);

    let mut current_row = row;
    for line in lines.iter().skip(scroll).take(available_rows) {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(MARGIN));

        match line.style {
            LineStyle::Text => print!("{}", Theme::fg(&theme.colors.text_normal)),
            LineStyle::Section => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.header_fg));
            }
            LineStyle::Dim => {
                print!("{}", Theme::dim());
                print!("{}", Theme::fg(&theme.colors.text_dim));
            }
            LineStyle::Accent => print!("{}", Theme::fg(&theme.colors.accent_fg)),
        }

        let shown: String = line.text.chars().take(width).collect();
        let shown_len = shown.chars().count();
        print!("{shown}");
        print!("{}", " ".repeat(cols.saturating_sub(MARGIN + shown_len)));
        print!("{}", Theme::reset());

        current_row += 1;
    }

    // Blank out any leftover rows so stale frames never show through.
    while current_row < row + available_rows {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(cols));
        current_row += 1;
    }

    current_row
}

/// Flattens the view model into wrapped, styled lines.
fn build_lines(detail: &DetailView, width: usize) -> Vec<Line> {
    let mut lines = Vec::new();

    if !detail.meta.is_empty() {
        lines.push(Line {
            text: detail.meta.clone(),
            style: LineStyle::Dim,
        });
    }

    if !detail.tags.is_empty() {
        let tag_line = detail
            .tags
            .iter()
            .map(|tag| format!("[{tag}]"))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line {
            text: tag_line,
            style: LineStyle::Accent,
        });
    }

    if let Some(description) = &detail.description {
        lines.push(blank());
        for text in wrap_text(description, width) {
            lines.push(Line {
                text,
                style: LineStyle::Text,
            });
        }
    }

    if !detail.ingredients.is_empty() {
        lines.push(blank());
        lines.push(section("Ingredients"));
        for ingredient in &detail.ingredients {
            for (idx, text) in wrap_text(ingredient, width.saturating_sub(4)).into_iter().enumerate() {
                let prefix = if idx == 0 { "  - " } else { "    " };
                lines.push(Line {
                    text: format!("{prefix}{text}"),
                    style: LineStyle::Text,
                });
            }
        }
    }

    if !detail.steps.is_empty() {
        lines.push(blank());
        lines.push(section("Steps"));
        for step in &detail.steps {
            for (idx, text) in wrap_text(step, width.saturating_sub(5)).into_iter().enumerate() {
                let prefix = if idx == 0 { "  " } else { "     " };
                lines.push(Line {
                    text: format!("{prefix}{text}"),
                    style: LineStyle::Text,
                });
            }
        }
    }

    if !detail.nutrition.is_empty() {
        lines.push(blank());
        lines.push(section("Nutrition (per serving)"));
        for (label, value) in &detail.nutrition {
            lines.push(Line {
                text: format!("  {label:<20} {value}"),
                style: LineStyle::Text,
            });
        }
    }

    if !detail.gallery.is_empty() {
        lines.push(blank());
        lines.push(section("Gallery"));
        for image in &detail.gallery {
            lines.push(Line {
                text: format!("  {image}"),
                style: LineStyle::Dim,
            });
        }
    }

    lines
}

fn blank() -> Line {
    Line {
        text: String::new(),
        style: LineStyle::Text,
    }
}

fn section(title: &str) -> Line {
    Line {
        text: title.to_string(),
        style: LineStyle::Section,
    }
}
