//! Create/edit form renderer.
//!
//! Each field takes three rows: label, input, and validation message.
//!
//! ```text
//!     Name
//!     [ Ann                              ]
//!     Name is required
//! ```

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormFieldInfo, FormInfo};

const INDENT: usize = 4;
const MAX_INPUT_WIDTH: usize = 48;

/// Renders all fields and the submit button from `row`.
pub fn render_form(row: usize, form: &FormInfo, theme: &Theme, cols: usize) -> usize {
    let input_width = cols.saturating_sub(INDENT * 2 + 4).min(MAX_INPUT_WIDTH);
    let mut current_row = row + 1;

    for field in &form.fields {
        current_row = render_field(current_row, field, theme, input_width);
    }

    position_cursor(current_row, INDENT + 1);
    if form.can_submit {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.focus_fg));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("[ {} ]", form.submit_label);
    print!("{}", Theme::reset());

    current_row + 1
}

fn render_field(row: usize, field: &FormFieldInfo, theme: &Theme, input_width: usize) -> usize {
    position_cursor(row, INDENT + 1);
    if field.focused {
        print!("{}", Theme::bold());
    }
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", field.label);
    print!("{}", Theme::reset());

    let frame = if field.error.is_some() {
        &theme.colors.error_fg
    } else if field.focused {
        &theme.colors.focus_fg
    } else {
        &theme.colors.border
    };

    let (text, is_placeholder) = if field.value.is_empty() {
        (field.placeholder.as_str(), true)
    } else {
        (field.value.as_str(), false)
    };
    let shown = if field.is_select {
        truncate(&format!("◀ {text} ▶"), input_width)
    } else if field.focused && !is_placeholder {
        // Keep the end of the value, where the cursor is, in view.
        let len = text.chars().count();
        let keep = input_width.saturating_sub(1);
        let tail: String = text.chars().skip(len.saturating_sub(keep)).collect();
        format!("{tail}▏")
    } else {
        truncate(text, input_width)
    };

    position_cursor(row + 1, INDENT + 1);
    print!("{}[ ", Theme::fg(frame));
    if is_placeholder {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{shown}");
    print!("{}", " ".repeat(input_width.saturating_sub(shown.chars().count())));
    print!("{} ]", Theme::fg(frame));
    print!("{}", Theme::reset());

    if let Some(error) = &field.error {
        position_cursor(row + 2, INDENT + 1);
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print!("{error}");
        print!("{}", Theme::reset());
    }

    row + 3
}
