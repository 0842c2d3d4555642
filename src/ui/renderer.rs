//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! Overlays (dialog, then toasts) are drawn after the body so they sit on top.

use crate::app::AppState;
use crate::notifications::NotificationId;
use crate::ui::components::{self, BODY_START_ROW};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output; Zellij clears the pane before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let body_row = components::render_chrome_top(&vm.header, theme, cols);
    debug_assert_eq!(body_row, BODY_START_ROW);

    components::render_body(body_row, &vm.body, theme, cols);
    components::render_chrome_bottom(&vm.footer, theme, cols, rows);

    if let Some(dialog) = &vm.dialog {
        components::render_dialog(dialog, theme, rows, cols);
    }

    components::render_toasts(BODY_START_ROW, &vm.toasts, theme, toast_rows(rows), cols);
}

/// Toasts may cover the body but never the footer border.
const fn toast_rows(rows: usize) -> usize {
    rows.saturating_sub(BODY_START_ROW + 2)
}

/// The notification drawn under the 1-indexed cell (`row`, `col`) of a
/// `rows` x `cols` pane, for click-to-dismiss.
#[must_use]
pub fn toast_at(state: &AppState, rows: usize, cols: usize, row: usize, col: usize) -> Option<NotificationId> {
    let toasts = state.compute_viewmodel(rows, cols).toasts;
    components::toast_at(BODY_START_ROW, &toasts, toast_rows(rows), cols, row, col)
}
