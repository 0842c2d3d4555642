//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They carry no
//! business logic, only display-ready data such as truncated text, highlight
//! ranges and selection flags.
//!
//! # Example
//!
//! ```rust
//! use roster::ui::viewmodel::{Body, EmptyState, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Employees (0) ".to_string() },
//!     body: Body::Message(EmptyState {
//!         message: "Loading employees...".to_string(),
//!         subtitle: String::new(),
//!     }),
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     dialog: None,
//!     toasts: vec![],
//! };
//! assert!(vm.dialog.is_none());
//! ```

use crate::domain::Department;
use crate::notifications::{NotificationId, Severity};

/// Width of the NAME column, including its trailing gap.
pub const NAME_COLUMN_WIDTH: usize = 26;
/// Widest the EMAIL column gets, including its trailing gap.
pub const EMAIL_COLUMN_WIDTH: usize = 36;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (title).
    pub header: HeaderInfo,

    /// Main content for the current view.
    pub body: Body,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Modal dialog drawn over the body.
    pub dialog: Option<DialogInfo>,

    /// Active notifications, oldest first.
    pub toasts: Vec<ToastInfo>,
}

/// What fills the area between header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    List(ListInfo),
    Detail(DetailInfo),
    Form(FormInfo),
    /// Centered message for loading and not-found states.
    Message(EmptyState),
}

/// Filter bar plus the visible window of the employee table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInfo {
    pub filter_bar: FilterBarInfo,

    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Shown instead of rows when nothing passes the filter.
    pub empty_state: Option<EmptyState>,
}

/// One row of the employee table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,
    pub email: String,
    pub department: Department,
    pub is_selected: bool,

    /// Search term occurrences in `name`, as `(start, end)` character indices.
    pub name_highlights: Vec<(usize, usize)>,

    /// Search term occurrences in `email`.
    pub email_highlights: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit  /: search").
    pub keybindings: String,
}

/// Centered message with a dimmed subtitle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search term and department selector above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub query: String,

    /// Selected department, or "All Departments".
    pub department: String,

    /// Whether the search input currently receives typing.
    pub typing: bool,
}

/// Labeled fields of one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub name: String,
    pub department: Department,
    pub fields: Vec<(String, String)>,
}

/// Create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    pub fields: Vec<FormFieldInfo>,
    pub submit_label: String,
    /// False while a request is in flight.
    pub can_submit: bool,
}

/// One form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldInfo {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub focused: bool,
    /// Rendered as a `◀ value ▶` selector instead of a text input.
    pub is_select: bool,
    pub error: Option<String>,
}

/// Modal confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogInfo {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub destructive: bool,
}

/// A notification as shown in the toast stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}
