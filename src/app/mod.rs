//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the domain, api and
//! notification layers. Nothing here talks to Zellij directly, so the whole
//! flow can be driven from tests.
//!
//! # Architecture
//!
//! ```text
//! Keys / Replies / Timers → Events → handle_event → State Mutations → Actions
//!                                ↑                                       ↓
//!                                └──────── web_request / set_timeout ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transitions
//! - [`modes`]: View and input mode types
//! - [`form`]: Create/edit form state and validation
//! - [`dialog`]: Confirmation prompt
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod dialog;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use dialog::ConfirmDialog;
pub use form::{EmployeeForm, FieldError, FormField};
pub use handler::{handle_event, Event};
pub use modes::{FormMode, InputMode, SearchFocus, View};
pub use state::{AppState, DetailState};
