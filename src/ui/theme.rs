//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are Catppuccin variants compiled into the binary; custom
//! themes are loaded from TOML files. Colors are hex strings converted to
//! 24-bit ANSI sequences at render time.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! focus_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! toast_fg = "#1e1e2e"
//! toast_success = "#a6e3a1"
//! toast_error = "#f38ba8"
//! toast_info = "#89b4fa"
//! toast_warning = "#fab387"
//! ```
//!
//! # Example
//!
//! ```rust
//! use roster::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! assert_eq!(theme.name, "catppuccin-latte");
//! print!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{Result, RosterError};
use crate::notifications::Severity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, subtitles and placeholders.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Border of the focused form field.
    pub focus_fg: String,
    /// Validation messages and destructive buttons.
    pub error_fg: String,

    /// Toast text, drawn on the severity color.
    pub toast_fg: String,
    pub toast_success: String,
    pub toast_error: String,
    pub toast_info: String,
    pub toast_warning: String,
}

impl ThemeColors {
    /// Background color of a toast with `severity`.
    #[must_use]
    pub fn toast_bg(&self, severity: Severity) -> &str {
        match severity {
            Severity::Success => &self.toast_success,
            Severity::Error => &self.toast_error,
            Severity::Info => &self.toast_info,
            Severity::Warning => &self.toast_warning,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Theme`] if the file cannot be read or its TOML
    /// cannot be parsed into a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RosterError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| RosterError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB, falling back to white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, "catppuccin-mocha");
        assert!(Theme::from_name("catppuccin-latte").is_some());
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_converts_to_ansi() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("00ff00"), "\u{1b}[48;2;0;255;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_loads_from_file() {
        let mut builtin = Theme::default();
        builtin.name = "custom".to_string();
        builtin.colors.toast_error = "#ff0000".to_string();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", toml::to_string(&builtin).unwrap()).unwrap();

        let loaded = Theme::from_file(file.path()).unwrap();
        assert_eq!(loaded, builtin);
        assert_eq!(loaded.colors.toast_bg(Severity::Error), "#ff0000");
    }

    #[test]
    fn incomplete_theme_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, RosterError::Theme(_)));
        assert!(Theme::from_file("/nonexistent/theme.toml").is_err());
    }
}
