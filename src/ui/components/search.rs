//! Filter bar component renderer.
//!
//! Renders the bordered box above the table holding the search term and the
//! department selector.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Horizontal margin for the filter box (spaces on left and right).
const FILTER_BOX_MARGIN: usize = 2;

/// Renders the 3-line filter box at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────────────────┐ [margin]
/// [margin] │ Search: ann▏          Department: ◀ HR ▶ │ [margin]
/// [margin] └──────────────────────────────────────────┘ [margin]
/// ```
///
/// The border uses `search_bar_border` while the search term is being typed
/// and the plain `border` color otherwise.
pub fn render_filter_bar(row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(FILTER_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if bar.typing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if bar.typing { "▏" } else { "" };
    let department_text = format!("Department: ◀ {} ▶ ", bar.department);
    let department_len = department_text.chars().count();
    let search_width = inner_width.saturating_sub(department_len + 1);
    let search_text = truncate(&format!(" Search: {}{cursor}", bar.query), search_width);
    let gap = inner_width.saturating_sub(search_text.chars().count() + department_len);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(gap));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{department_text}");
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(FILTER_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
