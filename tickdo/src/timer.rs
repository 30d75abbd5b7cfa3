//! Countdown timer lifecycle for todo items.
//!
//! [`TimerController`] runs at most one countdown at a time, tied to a
//! specific item's configured duration in minutes. It is a pure state
//! machine: [`tick`](TimerController::tick) is called once per elapsed
//! second by whoever drives the clock (the binary uses a
//! [`Ticker`](crate::ticker::Ticker)), which makes every transition
//! testable without a runtime or real time.
//!
//! # State Machine
//!
//! ```text
//!            start(item with duration)
//!   Idle ------------------------------> Running { item_id, remaining }
//!     ^                                     |         |
//!     |   start(same item)  [no notify]     |         | tick, remaining > 1
//!     +-------------------------------------+         |
//!     |                                               v
//!     |   tick reaches zero [notify expired]       (decrement)
//!     +-----------------------------------------------+
//! ```
//!
//! Starting a countdown while a different item's countdown is running
//! cancels the previous one silently and starts the new one.
//!
//! Timer state is ephemeral: it is never persisted and resets to idle
//! on process restart.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tickdo::notifier::NoopNotifier;
//! use tickdo::timer::{TimerController, TimerState};
//! use tickdo::types::{Category, Priority, TodoItem};
//!
//! let item = TodoItem::new(1, "Focus".into(), Category::Work, Priority::High, None, Some(25));
//! let mut timer = TimerController::new(Arc::new(NoopNotifier));
//!
//! timer.start(&item);
//! assert_eq!(timer.remaining_secs(), Some(25 * 60));
//!
//! // Starting again for the same item cancels the countdown.
//! timer.start(&item);
//! assert_eq!(timer.state(), &TimerState::Idle);
//! ```

use std::sync::Arc;

use tracing::{debug, trace};

use crate::notifier::{Notifier, NotifyEvent};
use crate::types::TodoItem;

/// Seconds per configured minute of timer duration.
const SECS_PER_MINUTE: u32 = 60;

/// Current state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// No countdown is running.
    #[default]
    Idle,

    /// A countdown is running for one item.
    Running {
        /// Id of the item the countdown is tied to.
        item_id: u64,
        /// Whole seconds left until expiry.
        remaining_secs: u32,
    },
}

/// Manages at most one active countdown.
///
/// The controller reads todo records (id and configured duration) but
/// never mutates them. Expiry fires the injected notifier exactly once;
/// user-initiated cancellation fires nothing.
pub struct TimerController {
    state: TimerState,
    notifier: Arc<dyn Notifier>,
}

impl TimerController {
    /// Creates an idle controller with the given notification capability.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: TimerState::Idle,
            notifier,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the remaining seconds while running, or `None` when idle.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        match self.state {
            TimerState::Running { remaining_secs, .. } => Some(remaining_secs),
            TimerState::Idle => None,
        }
    }

    /// Returns `true` if a countdown is running for the given item.
    #[must_use]
    pub fn is_running_for(&self, id: u64) -> bool {
        matches!(self.state, TimerState::Running { item_id, .. } if item_id == id)
    }

    /// Starts, toggles, or switches the countdown for an item.
    ///
    /// - The item has no configured duration: no-op.
    /// - A countdown is already running for this item: cancel it (back to
    ///   idle, no notification). This is the explicit user stop, distinct
    ///   from natural expiry.
    /// - A countdown is running for a different item: cancel that one
    ///   silently, then start this one.
    /// - Idle: start with `remaining_secs = duration_minutes * 60`.
    pub fn start(&mut self, item: &TodoItem) {
        let Some(minutes) = item.timer_duration else {
            trace!(id = item.id, "Item has no timer duration, ignoring start");
            return;
        };

        match self.state {
            TimerState::Running { item_id, .. } if item_id == item.id => {
                debug!(id = item.id, "Countdown cancelled by user");
                self.state = TimerState::Idle;
            }
            TimerState::Running { item_id, .. } => {
                debug!(
                    previous = item_id,
                    id = item.id,
                    "Switching countdown to a different item"
                );
                self.state = TimerState::Running {
                    item_id: item.id,
                    remaining_secs: minutes * SECS_PER_MINUTE,
                };
            }
            TimerState::Idle => {
                debug!(id = item.id, minutes, "Countdown started");
                self.state = TimerState::Running {
                    item_id: item.id,
                    remaining_secs: minutes * SECS_PER_MINUTE,
                };
            }
        }
    }

    /// Cancels any running countdown without a notification.
    ///
    /// Called on teardown so no countdown outlives its owner.
    pub fn cancel(&mut self) {
        if let TimerState::Running { item_id, .. } = self.state {
            debug!(id = item_id, "Countdown cancelled");
            self.state = TimerState::Idle;
        }
    }

    /// Advances the countdown by one second.
    ///
    /// No-op while idle. While running, decrements the remaining time;
    /// on reaching zero the controller transitions to idle and fires a
    /// single expiry notification.
    pub fn tick(&mut self) {
        let TimerState::Running {
            item_id,
            remaining_secs,
        } = self.state
        else {
            return;
        };

        let remaining = remaining_secs.saturating_sub(1);
        if remaining == 0 {
            debug!(id = item_id, "Countdown expired");
            self.state = TimerState::Idle;
            self.notifier.notify(NotifyEvent::TimerExpired);
        } else {
            self.state = TimerState::Running {
                item_id,
                remaining_secs: remaining,
            };
        }
    }
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
