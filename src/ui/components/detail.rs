//! Detail view renderer.

use crate::ui::helpers::{pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LABEL_WIDTH: usize = 16;
const INDENT: usize = 4;

/// Renders the employee's name, a department badge and the labeled fields.
pub fn render_detail(row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row + 1;

    position_cursor(current_row, INDENT + 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", truncate(&detail.name, cols.saturating_sub(INDENT * 2)));
    print!("{}", Theme::reset());
    print!("  ");
    print!("{}", Theme::bg(detail.department.color()));
    print!("{}", Theme::fg(&theme.colors.toast_fg));
    print!(" {} ", detail.department);
    print!("{}", Theme::reset());
    current_row += 2;

    let value_width = cols.saturating_sub(INDENT + LABEL_WIDTH + 1);
    for (label, value) in &detail.fields {
        position_cursor(current_row, INDENT + 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", pad(&format!("{label}:"), LABEL_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", truncate(value, value_width));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}
