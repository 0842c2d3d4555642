//! Toast stack renderer.
//!
//! Notifications are drawn in the top-right corner below the header, oldest
//! on top. When more are active than fit, the newest are kept.

use crate::notifications::{NotificationId, Severity};
use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

const MIN_TOAST_WIDTH: usize = 20;
const RIGHT_MARGIN: usize = 1;

const fn icon(severity: Severity) -> char {
    match severity {
        Severity::Success => '✓',
        Severity::Error => '✗',
        Severity::Info => 'i',
        Severity::Warning => '!',
    }
}

/// Where one toast lands on screen; `row` and `left` are 1-indexed.
struct Placement<'a> {
    toast: &'a ToastInfo,
    row: usize,
    left: usize,
    text: String,
}

impl Placement<'_> {
    /// Rendered width, including the trailing pad.
    fn width(&self) -> usize {
        self.text.chars().count() + 1
    }
}

fn layout(top: usize, toasts: &[ToastInfo], max_rows: usize, cols: usize) -> Vec<Placement<'_>> {
    let width = (cols / 2).max(MIN_TOAST_WIDTH).min(cols.saturating_sub(RIGHT_MARGIN));
    if width < 6 || max_rows == 0 {
        return vec![];
    }

    let skip = toasts.len().saturating_sub(max_rows);
    toasts
        .iter()
        .skip(skip)
        .enumerate()
        .map(|(offset, toast)| {
            let text = truncate(&format!(" {} {}", icon(toast.severity), toast.message), width - 1);
            let left = cols.saturating_sub(text.chars().count() + 1 + RIGHT_MARGIN) + 1;
            Placement {
                toast,
                row: top + offset,
                left,
                text,
            }
        })
        .collect()
}

/// Renders `toasts` from `top`, using at most `max_rows` rows.
pub fn render_toasts(top: usize, toasts: &[ToastInfo], theme: &Theme, max_rows: usize, cols: usize) {
    for placement in layout(top, toasts, max_rows, cols) {
        let severity = placement.toast.severity;
        position_cursor(placement.row, placement.left);
        print!("{}", Theme::bg(theme.colors.toast_bg(severity)));
        print!("{}", Theme::fg(&theme.colors.toast_fg));
        print!("{} ", placement.text);
        print!("{}", Theme::reset());
    }
}

/// The toast drawn under the 1-indexed cell (`row`, `col`), if any.
#[must_use]
pub fn toast_at(
    top: usize,
    toasts: &[ToastInfo],
    max_rows: usize,
    cols: usize,
    row: usize,
    col: usize,
) -> Option<NotificationId> {
    layout(top, toasts, max_rows, cols)
        .into_iter()
        .find(|p| p.row == row && (p.left..p.left + p.width()).contains(&col))
        .map(|p| p.toast.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u64, message: &str) -> ToastInfo {
        ToastInfo {
            id: NotificationId(id),
            message: message.to_string(),
            severity: Severity::Info,
        }
    }

    #[test]
    fn click_hits_the_toast_on_that_row() {
        let toasts = vec![toast(1, "Saved"), toast(2, "Deleted")];
        // " i Saved " is 9 wide, right-aligned with a one-column margin.
        assert_eq!(toast_at(4, &toasts, 10, 80, 4, 71), Some(NotificationId(1)));
        assert_eq!(toast_at(4, &toasts, 10, 80, 5, 79), Some(NotificationId(2)));
        assert_eq!(toast_at(4, &toasts, 10, 80, 4, 70), None);
        assert_eq!(toast_at(4, &toasts, 10, 80, 6, 75), None);
    }

    #[test]
    fn only_the_newest_fit() {
        let toasts = vec![toast(1, "a"), toast(2, "b"), toast(3, "c")];
        assert_eq!(toast_at(4, &toasts, 2, 80, 4, 78), Some(NotificationId(2)));
        assert_eq!(toast_at(4, &toasts, 2, 80, 5, 78), Some(NotificationId(3)));
    }
}
