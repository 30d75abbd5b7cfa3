//! Notification side-effect capability.
//!
//! Two points in the core fire a notification: toggling an item to
//! complete, and natural countdown expiry. The concrete mechanism is an
//! external collaborator, so it is modeled as the [`Notifier`] trait and
//! injected into the store and the timer controller. Tests substitute
//! [`RecordingNotifier`] to assert exactly when notifications fire.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use tracing::{debug, warn};

/// The two notification points in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyEvent {
    /// An item was toggled from incomplete to complete.
    TaskCompleted,
    /// A running countdown reached zero naturally (not cancelled).
    TimerExpired,
}

impl fmt::Display for NotifyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyEvent::TaskCompleted => write!(f, "task completed"),
            NotifyEvent::TimerExpired => write!(f, "timer expired"),
        }
    }
}

/// An abstract "play/alert" capability.
///
/// Implementations must not block for long and must not fail loudly: a
/// notification that cannot be delivered is logged and dropped, never
/// surfaced to the mutation that triggered it.
pub trait Notifier: Send + Sync {
    /// Delivers a notification for the given event.
    fn notify(&self, event: NotifyEvent);
}

/// Notifier that discards all events.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, event: NotifyEvent) {
        debug!(%event, "Notification suppressed (noop notifier)");
    }
}

/// Notifier that rings the terminal bell.
///
/// Writes the BEL control character to stderr so it does not interleave
/// with normal command output on stdout.
#[derive(Debug, Default)]
pub struct BellNotifier;

impl Notifier for BellNotifier {
    fn notify(&self, event: NotifyEvent) {
        debug!(%event, "Ringing terminal bell");
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            warn!(error = %e, "Failed to ring terminal bell");
        }
    }
}

/// Notifier that raises a desktop notification via the OS notification
/// service.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, event: NotifyEvent) {
        let (summary, body) = match event {
            NotifyEvent::TaskCompleted => ("Task completed", "Nice work - streak extended."),
            NotifyEvent::TimerExpired => ("Timer expired", "Your countdown reached zero."),
        };

        let result = notify_rust::Notification::new()
            .summary(summary)
            .body(body)
            .appname("tickdo")
            .show();

        match result {
            Ok(_) => debug!(%event, "Desktop notification shown"),
            Err(e) => warn!(%event, error = %e, "Failed to show desktop notification"),
        }
    }
}

/// Notifier that records every event, for tests.
///
/// # Example
///
/// ```
/// use tickdo::notifier::{Notifier, NotifyEvent, RecordingNotifier};
///
/// let notifier = RecordingNotifier::default();
/// notifier.notify(NotifyEvent::TimerExpired);
///
/// assert_eq!(notifier.events(), vec![NotifyEvent::TimerExpired]);
/// assert_eq!(notifier.count(NotifyEvent::TaskCompleted), 0);
/// ```
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NotifyEvent>>,
}

impl RecordingNotifier {
    /// Returns all recorded events in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().expect("notifier lock poisoned").clone()
    }

    /// Returns how many times the given event was delivered.
    #[must_use]
    pub fn count(&self, event: NotifyEvent) -> usize {
        self.events
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .filter(|e| **e == event)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: NotifyEvent) {
        self.events
            .lock()
            .expect("notifier lock poisoned")
            .push(event);
    }
}
