//! Tickdo - local todo list with per-item countdown timers.
//!
//! This crate provides the state-management core of a todo application:
//! a write-through persistent collection of todo items and a single-slot
//! countdown timer, plus the small amount of wiring (config, storage,
//! notifications) the binary needs around them.
//!
//! # Overview
//!
//! Two components carry the behavior:
//!
//! - [`store::TodoStore`] owns the todo collection. Every mutation
//!   (add, delete, edit, toggle) is written through to a durable slot
//!   immediately; reads (`statistics`, `sorted_view`) are pure
//!   projections.
//! - [`timer::TimerController`] runs at most one countdown at a time,
//!   ticking once per second, cancelling on user request and firing a
//!   notification on natural expiry.
//!
//! Both side-effect seams are injected: storage behind
//! [`storage::StorageSlot`] and notifications behind
//! [`notifier::Notifier`], so tests swap in in-memory and recording
//! fakes.
//!
//! # Concurrency
//!
//! The core is single-threaded and event-driven: all store mutations and
//! timer ticks execute as discrete, non-overlapping calls. The only
//! autonomous activity is the once-per-second [`ticker::Ticker`], which
//! is cancellable and stops cleanly when its owner is dropped.
//!
//! # Modules
//!
//! - [`types`]: Todo item, priority/category enums, statistics
//! - [`store`]: Collection state manager with write-through persistence
//! - [`timer`]: Countdown state machine
//! - [`ticker`]: Cancellable recurring tick source
//! - [`storage`]: Durable key-value slot abstraction
//! - [`notifier`]: Notification side-effect capability
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Crate-level error type

pub mod config;
pub mod error;
pub mod notifier;
pub mod storage;
pub mod store;
pub mod ticker;
pub mod timer;
pub mod types;

pub use config::{Config, ConfigError, NotifyMode};
pub use error::{Result, TickdoError};
pub use notifier::{BellNotifier, DesktopNotifier, NoopNotifier, Notifier, NotifyEvent};
pub use storage::{FileSlot, MemorySlot, StorageError, StorageSlot};
pub use store::{StoreError, TodoStore};
pub use ticker::Ticker;
pub use timer::{TimerController, TimerState};
pub use types::{Category, Priority, TodoItem, TodoStatistics};
