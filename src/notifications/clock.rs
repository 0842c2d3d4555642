//! Time source abstraction for notification expiry.
//!
//! The queue never reads the wall clock directly. The plugin injects
//! [`SystemClock`]; tests inject [`ManualClock`] and move time forward
//! explicitly, so expiry can be checked without sleeping.

use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Source of the current instant.
pub trait Clock: std::fmt::Debug {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time via `chrono::Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock.
///
/// Clones share the same instant, so a test can hand one clone to the queue
/// and keep another to advance time.
///
/// # Example
///
/// ```rust
/// use roster::notifications::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::default();
/// let handle = clock.clone();
/// let start = clock.now();
/// handle.advance(Duration::from_millis(250));
/// assert_eq!((clock.now() - start).num_milliseconds(), 250);
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub fn at(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Moves the shared instant forward.
    pub fn advance(&self, by: Duration) {
        let next = chrono::Duration::from_std(by)
            .ok()
            .and_then(|delta| self.now.get().checked_add_signed(delta));
        if let Some(next) = next {
            self.now.set(next);
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
