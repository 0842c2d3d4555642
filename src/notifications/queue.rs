//! Ordered store of active notifications with expiry and subscribers.

use super::clock::Clock;
use super::notification::{Notification, NotificationId, Severity};
use std::fmt;
use std::time::Duration;

/// Handle returned by [`NotificationQueue::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Callback = Box<dyn FnMut(&[Notification])>;

/// Default lifetimes used by the severity shortcuts.
///
/// `None` means "stay until dismissed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDefaults {
    pub success: Option<Duration>,
    pub error: Option<Duration>,
    pub info: Option<Duration>,
    pub warning: Option<Duration>,
}

impl NotificationDefaults {
    /// Lifetime for a given severity.
    #[must_use]
    pub const fn for_severity(&self, severity: Severity) -> Option<Duration> {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Info => self.info,
            Severity::Warning => self.warning,
        }
    }
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            success: Some(Duration::from_millis(3000)),
            error: Some(Duration::from_millis(5000)),
            info: Some(Duration::from_millis(3000)),
            warning: Some(Duration::from_millis(4000)),
        }
    }
}

/// Insertion-ordered queue of active notifications.
///
/// Every mutation goes through [`publish`](Self::publish),
/// [`dismiss`](Self::dismiss) or [`expire_due`](Self::expire_due), and each
/// one that changes the sequence notifies all subscribers synchronously with
/// the full new sequence.
///
/// The queue does not own a timer. Publishing with a lifetime records a
/// deadline read from the injected [`Clock`]; the caller arranges a wake-up
/// and calls `expire_due` when it fires. A wake-up that arrives after a
/// manual dismissal simply finds nothing to remove.
///
/// # Example
///
/// ```rust
/// use roster::notifications::{ManualClock, NotificationQueue, Severity};
/// use std::time::Duration;
///
/// let clock = ManualClock::default();
/// let mut queue = NotificationQueue::new(Box::new(clock.clone()));
///
/// let id = queue.publish("Saved", Severity::Success, Some(Duration::from_secs(1)));
/// assert!(queue.get(id).is_some());
///
/// clock.advance(Duration::from_secs(1));
/// queue.expire_due();
/// assert!(queue.is_empty());
/// ```
pub struct NotificationQueue {
    clock: Box<dyn Clock>,
    items: Vec<Notification>,
    next_id: u64,
    capacity: Option<usize>,
    defaults: NotificationDefaults,
    subscribers: Vec<(Subscription, Callback)>,
    next_subscription: u64,
}

impl NotificationQueue {
    /// Creates an empty, unbounded queue with default lifetimes.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            items: Vec::new(),
            next_id: 0,
            capacity: None,
            defaults: NotificationDefaults::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Overrides the per-severity default lifetimes.
    #[must_use]
    pub fn with_defaults(mut self, defaults: NotificationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Caps the number of simultaneously active notifications.
    ///
    /// When a publish exceeds the cap the oldest notifications are dropped.
    /// A cap of zero is treated as unbounded.
    #[must_use]
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity.filter(|&c| c > 0);
        self
    }

    /// Appends a notification and returns its fresh id.
    ///
    /// A `duration` greater than zero sets a deadline of `now + duration`.
    /// Always succeeds.
    pub fn publish(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Option<Duration>,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let expires_at = duration
            .filter(|d| !d.is_zero())
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .and_then(|d| self.clock.now().checked_add_signed(d));

        let notification = Notification {
            id,
            message: message.into(),
            severity,
            duration,
            expires_at,
        };

        tracing::debug!(
            id = id.0,
            severity = severity.label(),
            timed = expires_at.is_some(),
            "notification published"
        );

        self.items.push(notification);

        if let Some(capacity) = self.capacity {
            let overflow = self.items.len().saturating_sub(capacity);
            if overflow > 0 {
                tracing::debug!(dropped = overflow, "notification capacity reached, dropping oldest");
                self.items.drain(..overflow);
            }
        }

        self.notify();
        id
    }

    /// Publishes a success notification with the default lifetime.
    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::Success, self.defaults.for_severity(Severity::Success))
    }

    /// Publishes an error notification with the default lifetime.
    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::Error, self.defaults.for_severity(Severity::Error))
    }

    /// Publishes an info notification with the default lifetime.
    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::Info, self.defaults.for_severity(Severity::Info))
    }

    /// Publishes a warning notification with the default lifetime.
    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::Warning, self.defaults.for_severity(Severity::Warning))
    }

    /// Removes the notification with `id`.
    ///
    /// Returns `false` without notifying subscribers when it is already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let Some(position) = self.items.iter().position(|n| n.id == id) else {
            tracing::trace!(id = id.0, "dismiss ignored, notification already gone");
            return false;
        };

        self.items.remove(position);
        tracing::debug!(id = id.0, remaining = self.items.len(), "notification dismissed");
        self.notify();
        true
    }

    /// Removes every notification whose deadline has passed.
    ///
    /// Returns how many were removed. Subscribers are notified once if any.
    pub fn expire_due(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        let removed = before - self.items.len();

        if removed > 0 {
            tracing::debug!(removed, remaining = self.items.len(), "notifications expired");
            self.notify();
        }
        removed
    }

    /// Time left until the earliest pending deadline, if any.
    ///
    /// Returns `Duration::ZERO` for deadlines already in the past.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.items
            .iter()
            .filter_map(|n| n.expires_at)
            .min()
            .map(|deadline| (deadline - now).to_std().unwrap_or(Duration::ZERO))
    }

    /// Registers `callback`, invoking it immediately with the current sequence
    /// and again after every change.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&[Notification]) + 'static) -> Subscription {
        let handle = Subscription(self.next_subscription);
        self.next_subscription += 1;

        callback(&self.items);
        self.subscribers.push((handle, Box::new(callback)));
        handle
    }

    /// Removes a subscriber. Returns `false` for an unknown handle.
    pub fn unsubscribe(&mut self, handle: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(h, _)| *h != handle);
        before != self.subscribers.len()
    }

    /// Active notifications in display order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.items
    }

    /// Looks up an active notification.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn notify(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback(&self.items);
        }
    }
}

impl fmt::Debug for NotificationQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationQueue")
            .field("clock", &self.clock)
            .field("items", &self.items)
            .field("next_id", &self.next_id)
            .field("capacity", &self.capacity)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ManualClock;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn queue() -> (NotificationQueue, ManualClock) {
        let clock = ManualClock::default();
        (NotificationQueue::new(Box::new(clock.clone())), clock)
    }

    fn messages(queue: &NotificationQueue) -> Vec<&str> {
        queue.notifications().iter().map(|n| n.message.as_str()).collect()
    }

    #[test]
    fn publish_preserves_order_with_unique_ids() {
        let (mut queue, _) = queue();
        let ids: Vec<_> = ["one", "two", "three", "four"]
            .iter()
            .map(|m| queue.publish(*m, Severity::Info, None))
            .collect();

        assert_eq!(messages(&queue), vec!["one", "two", "three", "four"]);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let (mut queue, _) = queue();
        let first = queue.publish("a", Severity::Info, None);
        queue.dismiss(first);
        let second = queue.publish("b", Severity::Info, None);
        assert_ne!(first, second);
        assert_eq!(second, NotificationId(1));
    }

    #[test]
    fn dismiss_twice_is_a_noop_the_second_time() {
        let (mut queue, _) = queue();
        let keep = queue.publish("keep", Severity::Info, None);
        let drop = queue.publish("drop", Severity::Error, None);

        assert!(queue.dismiss(drop));
        assert!(!queue.dismiss(drop));
        assert_eq!(queue.len(), 1);
        assert!(queue.get(keep).is_some());
    }

    #[test]
    fn timed_notification_expires_after_its_duration() {
        let (mut queue, clock) = queue();
        let id = queue.publish("saved", Severity::Success, Some(Duration::from_millis(1000)));
        assert!(queue.get(id).is_some());

        clock.advance(Duration::from_millis(999));
        assert_eq!(queue.expire_due(), 0);
        assert!(queue.get(id).is_some());

        clock.advance(Duration::from_millis(1));
        assert_eq!(queue.expire_due(), 1);
        assert!(queue.get(id).is_none());
    }

    #[test]
    fn zero_or_missing_duration_never_expires() {
        let (mut queue, clock) = queue();
        queue.publish("sticky", Severity::Warning, None);
        queue.publish("zero", Severity::Warning, Some(Duration::ZERO));

        clock.advance(Duration::from_secs(3600));
        assert_eq!(queue.expire_due(), 0);
        assert_eq!(queue.len(), 2);
        assert!(queue.next_deadline().is_none());
    }

    #[test]
    fn expiry_after_manual_dismiss_finds_nothing() {
        let (mut queue, clock) = queue();
        let id = queue.publish("bye", Severity::Info, Some(Duration::from_millis(500)));
        assert!(queue.dismiss(id));

        clock.advance(Duration::from_millis(500));
        assert_eq!(queue.expire_due(), 0);
    }

    #[test]
    fn next_deadline_tracks_earliest_pending() {
        let (mut queue, clock) = queue();
        queue.publish("slow", Severity::Error, Some(Duration::from_millis(5000)));
        queue.publish("fast", Severity::Success, Some(Duration::from_millis(3000)));

        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(3000)));
        clock.advance(Duration::from_millis(3500));
        assert_eq!(queue.next_deadline(), Some(Duration::ZERO));
        queue.expire_due();
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn severity_shortcuts_use_defaults() {
        let (mut queue, _) = queue();
        let ok = queue.success("ok");
        let err = queue.error("err");
        let warn = queue.warning("warn");

        assert_eq!(queue.get(ok).unwrap().duration, Some(Duration::from_millis(3000)));
        assert_eq!(queue.get(err).unwrap().duration, Some(Duration::from_millis(5000)));
        assert_eq!(queue.get(warn).unwrap().severity, Severity::Warning);
    }

    #[test]
    fn subscriber_sees_current_sequence_then_every_change() {
        let (mut queue, clock) = queue();
        queue.publish("existing", Severity::Info, Some(Duration::from_millis(10)));

        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&seen);
        queue.subscribe(move |items| sink.borrow_mut().push(items.len()));
        assert_eq!(*seen.borrow(), vec![1]);

        let id = queue.publish("new", Severity::Info, None);
        queue.dismiss(id);
        queue.dismiss(id);
        clock.advance(Duration::from_millis(10));
        queue.expire_due();

        assert_eq!(*seen.borrow(), vec![1, 2, 1, 0]);
    }

    #[test]
    fn unsubscribed_callback_stops_receiving() {
        let (mut queue, _) = queue();
        let first: Rc<RefCell<u32>> = Rc::default();
        let second: Rc<RefCell<u32>> = Rc::default();

        let a = Rc::clone(&first);
        let handle = queue.subscribe(move |_| *a.borrow_mut() += 1);
        let b = Rc::clone(&second);
        queue.subscribe(move |_| *b.borrow_mut() += 1);

        assert!(queue.unsubscribe(handle));
        assert!(!queue.unsubscribe(handle));
        queue.publish("x", Severity::Info, None);

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 2);
    }

    #[test]
    fn capacity_drops_oldest_first() {
        let (queue, _) = queue();
        let mut queue = queue.with_capacity(Some(2));
        queue.publish("a", Severity::Info, None);
        queue.publish("b", Severity::Info, None);
        queue.publish("c", Severity::Info, None);
        assert_eq!(messages(&queue), vec!["b", "c"]);
    }
}
