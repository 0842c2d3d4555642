//! Table component renderer.
//!
//! Renders the employee list as a three-column table (NAME, EMAIL,
//! DEPARTMENT) with selection and search match highlighting. Departments are
//! drawn in their own color.

use crate::ui::helpers::{self, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, EMAIL_COLUMN_WIDTH, NAME_COLUMN_WIDTH};

fn email_width(cols: usize) -> usize {
    cols.saturating_sub(NAME_COLUMN_WIDTH).min(EMAIL_COLUMN_WIDTH)
}

/// Renders the bold column headers at `row` and returns the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{}{}DEPARTMENT",
        pad("NAME", NAME_COLUMN_WIDTH),
        pad("EMAIL", email_width(cols))
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every item starting at `row` and returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one employee row.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`), across the full width
/// 2. Search match highlights, restoring the row style after each run
/// 3. Department color in the last column (unless selected)
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    helpers::render_highlighted_text(&item.name, &item.name_highlights, theme, &base);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(item.name.chars().count())));

    let email_col = email_width(cols);
    helpers::render_highlighted_text(&item.email, &item.email_highlights, theme, &base);
    print!("{}", " ".repeat(email_col.saturating_sub(item.email.chars().count())));

    if !item.is_selected {
        print!("{}", Theme::fg(item.department.color()));
    }
    let department = item.department.as_str();
    print!("{department}");

    let line_len = NAME_COLUMN_WIDTH + email_col + department.len();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
