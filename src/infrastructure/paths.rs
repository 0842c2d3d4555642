//! Path utilities for the Zellij sandbox environment.

use std::path::PathBuf;

/// Directory holding the trace log: `/host/.local/share/zellij/roster`.
///
/// `/host` points to the cwd of the last focused terminal, or the folder
/// Zellij was started from, so this usually resolves to
/// `~/.local/share/zellij/roster`.
///
/// # Examples
///
/// ```
/// use roster::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/roster"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("roster")
}

/// Maps `~` and `~/...` onto the sandbox's `/host` mount.
///
/// Used for the `theme_file` option so users can write `~/themes/x.toml`.
///
/// # Examples
///
/// ```
/// use roster::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
