//! Cancellable recurring tick source.
//!
//! The countdown needs one autonomous activity: a callback once per
//! second while a timer runs. [`Ticker`] wraps that recurring schedule
//! as a background task that sends unit ticks over a channel, with an
//! explicit cancel and cancel-on-drop so no scheduled callback is left
//! outstanding after its owner is torn down.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//! use tickdo::ticker::Ticker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel(16);
//!     let ticker = Ticker::spawn(Duration::from_secs(1), tx);
//!
//!     while rx.recv().await.is_some() {
//!         // advance the countdown by one second...
//!         # break;
//!     }
//!
//!     ticker.cancel();
//! }
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

/// A recurring tick source backed by a background task.
///
/// Ticks are emitted on the provided channel at the configured interval.
/// The task stops when [`cancel`](Self::cancel) is called, when the
/// `Ticker` is dropped, or when the receiving side of the channel is
/// closed.
#[derive(Debug)]
pub struct Ticker {
    handle: tokio::task::JoinHandle<()>,
}

impl Ticker {
    /// Spawns a ticker emitting on `tx` every `interval`.
    ///
    /// The first tick fires one full interval after the spawn, not
    /// immediately. If the channel is full a tick is dropped rather than
    /// delivered late; a slow receiver never sees a burst of stale ticks.
    #[must_use]
    pub fn spawn(interval: Duration, tx: mpsc::Sender<()>) -> Self {
        let handle = tokio::spawn(async move {
            let mut clock = tokio::time::interval(interval);
            clock.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // interval's first tick completes immediately; swallow it.
            clock.tick().await;

            loop {
                clock.tick().await;
                trace!("Tick");
                match tx.try_send(()) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(())) => {
                        trace!("Tick dropped, receiver is behind");
                    }
                    Err(mpsc::error::TrySendError::Closed(())) => {
                        debug!("Tick receiver closed, stopping ticker");
                        break;
                    }
                }
            }
        });

        Self { handle }
    }

    /// Stops the ticker. No further ticks are delivered after this
    /// returns.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
