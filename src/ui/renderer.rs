//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view
//! model computation and delegation to UI components. It chooses between
//! the listing and detail layouts based on the computed view model.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// appropriate layout. Prints ANSI-styled output using `print!` macros;
/// does not clear the screen or manage cursor visibility.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a view model with the layout its contents call for.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if let Some(detail) = &vm.detail {
        components::render_detail_mode(vm, detail, theme, cols, rows);
    } else {
        components::render_listing_mode(vm, theme, cols, rows);
    }
}
