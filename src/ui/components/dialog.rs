//! Confirmation dialog renderer.
//!
//! Draws a centered box over whatever the body rendered:
//!
//! ```text
//! ┌─ Delete Employee ─────────────────────┐
//! │                                       │
//! │ Are you sure you want to delete Ann?  │
//! │ This action cannot be undone.         │
//! │                                       │
//! │               [ Cancel ]  [ Delete ]  │
//! └───────────────────────────────────────┘
//! ```

use crate::ui::helpers::{pad, position_cursor, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DialogInfo;

const MAX_DIALOG_WIDTH: usize = 56;

pub fn render_dialog(dialog: &DialogInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_DIALOG_WIDTH);
    if width < 12 {
        return;
    }
    let inner = width - 2;
    let text_width = inner - 2;

    let lines = wrap(&dialog.message, text_width);
    let height = lines.len() + 6;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = (cols - width) / 2 + 1;

    let border = Theme::fg(&theme.colors.border);
    let text = Theme::fg(&theme.colors.text_normal);

    let title = truncate(&format!(" {} ", dialog.title), inner.saturating_sub(2));
    position_cursor(top, left);
    print!("{border}┌─{}{title}{border}", Theme::bold());
    print!("{}", "─".repeat(inner.saturating_sub(title.chars().count() + 1)));
    print!("┐{}", Theme::reset());

    let mut row = top + 1;
    let body_line = |row: usize, content: &str| {
        position_cursor(row, left);
        print!("{border}│{text} {} {border}│{}", pad(content, text_width), Theme::reset());
    };

    body_line(row, "");
    row += 1;
    for line in &lines {
        body_line(row, line);
        row += 1;
    }
    body_line(row, "");
    row += 1;

    let cancel = format!("[ {} ]", dialog.cancel_text);
    let confirm = format!("[ {} ]", dialog.confirm_text);
    let buttons_len = cancel.chars().count() + 2 + confirm.chars().count();
    let confirm_color = if dialog.destructive {
        &theme.colors.error_fg
    } else {
        &theme.colors.focus_fg
    };

    position_cursor(row, left);
    print!("{border}│{text}");
    print!("{}", " ".repeat(inner.saturating_sub(buttons_len + 1)));
    print!("{cancel}  ");
    print!("{}{}{confirm}{}", Theme::bold(), Theme::fg(confirm_color), Theme::reset());
    print!("{border} │{}", Theme::reset());
    row += 1;

    body_line(row, "");
    row += 1;

    position_cursor(row, left);
    print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());
}
