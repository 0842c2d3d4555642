//! Roster: A Zellij plugin for browsing and editing employee records.
//!
//! Roster is a terminal client for a small employee REST service:
//! - Filterable employee table (name/email search plus department selector)
//! - Detail view with created/updated timestamps
//! - Create and edit forms with inline validation
//! - Delete with a confirmation dialog
//! - Toast notifications with per-severity lifetimes

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web_request, set_timeout            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, views, form, dialog              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Notifications │
//! │ (ui/)         │   │ (api/)        │   │ (notifications│
//! │ - Rendering   │   │ - Requests    │   │ - Queue       │
//! │ - Theming     │   │ - Reply decode│   │ - Expiry      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Filter & Infrastructure                    │
//! │  - Employee, Department, errors (domain/)           │
//! │  - List filtering (filter)                          │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing + OpenTelemetry, OTLP JSON file export   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/roster.wasm" {
//!         api_url "http://localhost:8080/api"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!         error_ms "8000"
//!         max_notifications "5"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use roster::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (render, actions) = handle_event(&mut state, &Event::Ready)?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::SendRequest(_)));
//! # Ok::<(), roster::RosterError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod notifications;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, FormMode, InputMode, SearchFocus, View};
pub use domain::{ApiError, Department, Employee, EmployeeId, Result, RosterError};
pub use ui::Theme;

use notifications::{NotificationDefaults, NotificationQueue, SystemClock};
use std::collections::BTreeMap;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Lifetimes are in milliseconds; `0` keeps notifications of that severity
/// until they are dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the employee service. Default: `http://localhost:8080/api`
    pub api_url: String,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for traces. Default: `"info"`
    pub trace_level: Option<String>,

    pub success_ms: u64,
    pub error_ms: u64,
    pub info_ms: u64,
    pub warning_ms: u64,

    /// Most notifications shown at once; `None` is unbounded.
    pub max_notifications: Option<usize>,
}

/// Default base URL of the employee service.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            success_ms: 3000,
            error_ms: 5000,
            info_ms: 3000,
            warning_ms: 4000,
            max_notifications: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or unparseable values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use roster::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://hr.internal/api/".to_string());
    /// map.insert("error_ms".to_string(), "9000".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "http://hr.internal/api");
    /// assert_eq!(config.error_ms, 9000);
    /// assert_eq!(config.success_ms, 3000);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, fallback: u64| {
            config
                .get(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(fallback)
        };

        let api_url = config
            .get("api_url")
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .map_or(defaults.api_url, String::from);

        let max_notifications = config
            .get("max_notifications")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0);

        Self {
            api_url,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            success_ms: millis("success_ms", defaults.success_ms),
            error_ms: millis("error_ms", defaults.error_ms),
            info_ms: millis("info_ms", defaults.info_ms),
            warning_ms: millis("warning_ms", defaults.warning_ms),
            max_notifications,
        }
    }

    /// Per-severity notification lifetimes.
    #[must_use]
    pub fn notification_defaults(&self) -> NotificationDefaults {
        let lifetime = |ms: u64| (ms > 0).then_some(Duration::from_millis(ms));
        NotificationDefaults {
            success: lifetime(self.success_ms),
            error: lifetime(self.error_ms),
            info: lifetime(self.info_ms),
            warning: lifetime(self.warning_ms),
        }
    }

    fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name
            .as_deref()
            .and_then(|name| {
                let theme = Theme::from_name(name);
                if theme.is_none() {
                    tracing::warn!(theme_name = %name, "unknown theme, using default");
                }
                theme
            })
            .unwrap_or_default()
    }
}

/// Builds the initial application state for `config`.
///
/// Resolves the theme (file, then name, then default) and creates the
/// notification queue on the system clock. The employee list starts empty;
/// it is loaded once `Event::Ready` arrives.
///
/// # Example
///
/// ```rust
/// use roster::{initialize, Config, View};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.view, View::List);
/// assert!(state.notifications.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing roster plugin");

    let mut queue = NotificationQueue::new(Box::new(SystemClock))
        .with_defaults(config.notification_defaults())
        .with_capacity(config.max_notifications);

    queue.subscribe(|active| {
        tracing::debug!(active = active.len(), "notifications changed");
    });

    AppState::new(config.load_theme(), queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("success_ms", "soon"),
            ("warning_ms", "-1"),
            ("max_notifications", "0"),
            ("api_url", "   "),
        ]));
        assert_eq!(config.success_ms, 3000);
        assert_eq!(config.warning_ms, 4000);
        assert_eq!(config.max_notifications, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn zero_lifetime_means_sticky() {
        let config = Config::from_zellij(&map(&[("error_ms", "0"), ("max_notifications", "4")]));
        let defaults = config.notification_defaults();
        assert_eq!(defaults.error, None);
        assert_eq!(defaults.success, Some(Duration::from_millis(3000)));
        assert_eq!(config.max_notifications, Some(4));
    }

    #[test]
    fn theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-latte");

        let unknown = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(unknown.load_theme(), Theme::default());
    }
}
