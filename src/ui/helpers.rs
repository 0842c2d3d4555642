//! Shared rendering utilities and helpers.
//!
//! Low-level helpers used across UI components: cursor positioning,
//! match highlighting with proper ANSI reset handling, and character-safe
//! truncation and padding.
//!
//! # Example
//!
//! ```rust
//! use roster::ui::helpers::{pad, truncate};
//!
//! assert_eq!(truncate("Annabelle", 6), "Ann...");
//! assert_eq!(pad("Ann", 5), "Ann  ");
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `width` characters, ending in "..." when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Right-pads `text` with spaces to `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. When the row is
/// selected, the selection colors are restored after each highlighted run so
/// the row background stays intact.
///
/// `base` is the escape sequence active before the call (used to resume normal
/// styling after each highlight).
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base: &str,
) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{base}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Splits `text` into lines no wider than `width`, breaking at spaces.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = usize::from(!line.is_empty()) + word.chars().count();
        if !line.is_empty() && line.chars().count() + needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Zoë Ångström", 20), "Zoë Ångström");
        assert_eq!(truncate("Zoë Ångström", 7), "Zoë ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn wrap_breaks_at_spaces() {
        assert_eq!(
            wrap("Are you sure you want to delete Ann?", 16),
            vec!["Are you sure you", "want to delete", "Ann?"]
        );
        assert!(wrap("", 10).is_empty());
    }
}
