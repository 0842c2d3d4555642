//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after each event, so several side
//! effects can be queued at once. The plugin shim executes them in order: it
//! prepares and issues web requests, arms host timers, and hides the pane.
//!
//! # Example
//!
//! ```rust
//! use roster::api::ApiRequest;
//! use roster::app::Action;
//! use std::time::Duration;
//!
//! let actions = vec![
//!     Action::SendRequest(ApiRequest::ListEmployees),
//!     Action::ScheduleTimer(Duration::from_secs(3)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::ApiRequest;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues a backend request. Its reply arrives later as an
    /// [`Event::ApiReply`](crate::app::Event::ApiReply).
    SendRequest(ApiRequest),

    /// Arms a host timer. When it fires the shim sends
    /// [`Event::Tick`](crate::app::Event::Tick) so expired notifications are
    /// removed.
    ScheduleTimer(Duration),
}
