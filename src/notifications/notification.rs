//! Notification value type and severity levels.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Identity of a notification, unique for the lifetime of its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    /// Short lowercase label for log fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// A transient user-facing message.
///
/// Created by [`NotificationQueue::publish`](super::NotificationQueue::publish).
/// `expires_at` is derived from the queue's clock at publish time and is
/// `None` for notifications that stay until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub duration: Option<Duration>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Whether the notification's deadline has passed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}
