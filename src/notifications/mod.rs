//! Transient user-facing notifications (toasts).
//!
//! [`NotificationQueue`] owns the ordered list of active notifications and is
//! the only place it changes. Views subscribe to it or read it directly when
//! rendering. Expiry is driven by an injected [`Clock`] so that elapsed time
//! can be simulated in tests.
//!
//! # Modules
//!
//! - [`notification`]: `Notification`, `NotificationId`, `Severity`
//! - [`queue`]: the queue, its subscribers and default lifetimes
//! - [`clock`]: `Clock` trait with system and manual implementations

pub mod clock;
pub mod notification;
pub mod queue;

pub use clock::{Clock, ManualClock, SystemClock};
pub use notification::{Notification, NotificationId, Severity};
pub use queue::{NotificationDefaults, NotificationQueue, Subscription};
