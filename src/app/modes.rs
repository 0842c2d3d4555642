//! Navigation and input mode state types for the application.
//!
//! The plugin shows one [`View`] at a time. Within the list view, the
//! [`InputMode`] decides whether keys move the selection or edit the search
//! term.
//!
//! # State Machine
//!
//! ```text
//! List ──Enter──▶ Detail(id) ──e──▶ Form(Edit(id))
//!  │                 ▲                   │
//!  │                 └──── saved ────────┘
//!  └──a──▶ Form(Create) ──saved──▶ List
//! ```
//!
//! # Example
//!
//! ```rust
//! use roster::app::modes::{FormMode, InputMode, SearchFocus, View};
//!
//! let view = View::Form(FormMode::Edit(7));
//! assert_ne!(view, View::Detail(7));
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! assert!(input_mode.is_search());
//! ```

use crate::domain::EmployeeId;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input and backspace; enter moves focus to the results.
    Typing,

    /// User is navigating through the filtered results.
    ///
    /// Accepts j/k for movement, enter to open, and / to return to Typing.
    Navigating,
}

/// Current input handling mode of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Search term editing, with a [`SearchFocus`].
    Search(SearchFocus),
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }
}

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EmployeeId),
}

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Filterable table of all employees.
    List,

    /// A single employee's fields and timestamps.
    Detail(EmployeeId),

    /// Create or edit form.
    Form(FormMode),
}
