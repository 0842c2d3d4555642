//! Composable UI component renderers.
//!
//! Each component renders one part of the interface at a given row and returns
//! the next free row where that makes sense.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Filter bar (search term and department selector)
//! - [`table`]: Employee list (NAME, EMAIL, DEPARTMENT)
//! - [`empty`]: Centered message for loading, empty and not-found states
//! - [`detail`]: One employee's fields
//! - [`form`]: Create/edit form
//! - [`dialog`]: Confirmation overlay
//! - [`toast`]: Notification stack overlay
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Body: list / detail / form / message]
//! [Border]
//! [Footer]
//! ```
//!
//! The dialog and toasts are drawn last, over the body.

mod detail;
mod dialog;
mod empty;
mod footer;
mod form;
mod header;
mod search;
mod table;
mod toast;

pub use dialog::render_dialog;
pub use toast::{render_toasts, toast_at};

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, FooterInfo, HeaderInfo, ListInfo};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use header::render_header;
use search::render_filter_bar;
use table::{render_table_headers, render_table_rows};

/// First row available to the body.
pub const BODY_START_ROW: usize = 4;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders header and border at the top, returning the first body row.
pub fn render_chrome_top(header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let current_row = render_header(2, header, theme, cols);
    render_border(current_row, &theme.colors.border, cols)
}

/// Renders the bottom border and footer on the last two rows.
pub fn render_chrome_bottom(footer: &FooterInfo, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.saturating_sub(1).max(1);
    let border_row = footer_start.saturating_sub(1).max(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, footer, theme, cols);
}

/// Renders the body for the current view from `row`.
pub fn render_body(row: usize, body: &Body, theme: &Theme, cols: usize) {
    match body {
        Body::List(list) => render_list(row, list, theme, cols),
        Body::Detail(detail) => {
            render_detail(row, detail, theme, cols);
        }
        Body::Form(form) => {
            render_form(row, form, theme, cols);
        }
        Body::Message(message) => render_empty_state(row + 2, message, theme, cols),
    }
}

/// Filter bar, column headers, then rows or the empty state.
fn render_list(row: usize, list: &ListInfo, theme: &Theme, cols: usize) {
    let mut current_row = render_filter_bar(row, &list.filter_bar, theme, cols);
    current_row = render_table_headers(current_row, theme, cols);

    if let Some(empty) = &list.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
    } else {
        render_table_rows(current_row, &list.display_items, theme, cols);
    }
}
