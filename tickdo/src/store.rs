//! Todo collection state manager.
//!
//! [`TodoStore`] is the single source of truth for the todo collection.
//! Every mutating operation writes the whole collection through to the
//! durable slot immediately after the in-memory update; reads are pure
//! projections over the in-memory state.
//!
//! # Error Design
//!
//! Expected conditions are silent no-ops, never errors:
//!
//! - `add` with an empty or whitespace-only title does nothing
//! - lookup misses on delete/toggle/edit do nothing
//! - a corrupt stored value at startup falls back to an empty collection
//!
//! The only surfaced failures are environmental (the slot cannot be
//! written, or the collection cannot be serialized).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tickdo::notifier::NoopNotifier;
//! use tickdo::storage::MemorySlot;
//! use tickdo::store::TodoStore;
//! use tickdo::types::{Category, Priority};
//!
//! let mut store = TodoStore::load(Box::new(MemorySlot::default()), Arc::new(NoopNotifier));
//!
//! let id = store
//!     .add("Buy milk", Category::Shopping, Priority::High, None, None)
//!     .unwrap()
//!     .expect("non-empty title is accepted");
//!
//! store.toggle_completed(id).unwrap();
//! assert_eq!(store.statistics().completed, 1);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::notifier::{Notifier, NotifyEvent};
use crate::storage::{StorageError, StorageSlot};
use crate::types::{Category, Priority, TodoItem, TodoStatistics};

/// Errors that can occur during store mutations.
///
/// Both variants are environmental; the store never errors on user input.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The durable slot could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The collection could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A specialized `Result` type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Owner of the todo collection.
///
/// The collection preserves insertion order; display order is the
/// derived projection returned by [`sorted_view`](Self::sorted_view).
/// All mutation goes through the methods below - no external caller
/// mutates a [`TodoItem`]'s fields directly.
pub struct TodoStore {
    /// The live collection, in insertion order.
    items: Vec<TodoItem>,

    /// Next id to assign. Always greater than every live id.
    next_id: u64,

    /// Durable slot written through on every mutation.
    slot: Box<dyn StorageSlot>,

    /// Completion notification capability.
    notifier: Arc<dyn Notifier>,
}

impl TodoStore {
    /// Constructs a store by loading the collection from the durable slot.
    ///
    /// Loading is best-effort: a missing slot, an unreadable slot, or a
    /// value that fails to deserialize all produce an empty collection.
    /// Failures are logged at `warn` and never propagated - the caller
    /// always gets a usable store.
    #[must_use]
    pub fn load(slot: Box<dyn StorageSlot>, notifier: Arc<dyn Notifier>) -> Self {
        let items = match slot.read() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<TodoItem>>(&raw) {
                Ok(items) => {
                    debug!(count = items.len(), "Loaded todo collection from slot");
                    items
                }
                Err(e) => {
                    warn!(error = %e, "Stored todo collection is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No stored todo collection, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored todo collection, starting empty");
                Vec::new()
            }
        };

        let next_id = items.iter().map(|item| item.id).max().map_or(1, |m| m + 1);

        Self {
            items,
            next_id,
            slot,
            notifier,
        }
    }

    /// Appends a new item to the collection.
    ///
    /// The title is trimmed before storing. If it trims to empty the call
    /// is a silent no-op and returns `Ok(None)`; the caller receives no
    /// error signal, matching the validation design.
    ///
    /// On success returns the freshly assigned id and persists the
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if persisting the updated collection
    /// fails.
    pub fn add(
        &mut self,
        title: &str,
        category: Category,
        priority: Priority,
        due_date: Option<DateTime<Utc>>,
        timer_duration: Option<u32>,
    ) -> Result<Option<u64>> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            trace!("Rejected add with empty title");
            return Ok(None);
        }

        let id = self.next_id;
        self.next_id += 1;

        let item = TodoItem::new(
            id,
            trimmed.to_string(),
            category,
            priority,
            due_date,
            timer_duration,
        );
        debug!(id, title = %item.title, %category, %priority, "Added todo");
        self.items.push(item);

        self.persist()?;
        Ok(Some(id))
    }

    /// Removes the item with the given id.
    ///
    /// A lookup miss is a silent no-op (and does not rewrite the slot).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if persisting fails.
    pub fn delete(&mut self, id: u64) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);

        if self.items.len() == before {
            trace!(id, "Delete miss, ignoring");
            return Ok(());
        }

        debug!(id, "Deleted todo");
        self.persist()
    }

    /// Puts the item into inline-edit mode, seeding the staging title
    /// from the current title.
    ///
    /// Does not persist; edit mode is working state, committed by
    /// [`commit_edit`](Self::commit_edit).
    pub fn begin_edit(&mut self, id: u64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.edited_title = item.title.clone();
            item.is_edit = true;
            trace!(id, "Began edit");
        }
    }

    /// Updates the staging title of an item in edit mode.
    ///
    /// Does not persist until [`commit_edit`](Self::commit_edit).
    pub fn change_edited_title(&mut self, id: u64, text: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.edited_title = text.to_string();
        }
    }

    /// Commits the staged title and leaves edit mode.
    ///
    /// The staged title goes through the same trim-and-reject rule as
    /// [`add`](Self::add): the trimmed value replaces the title unless it
    /// is empty, in which case the original title is kept. Edit mode ends
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if persisting fails.
    pub fn commit_edit(&mut self, id: u64) -> Result<()> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            trace!(id, "Commit-edit miss, ignoring");
            return Ok(());
        };

        let staged = item.edited_title.trim();
        if staged.is_empty() {
            trace!(id, "Rejected empty edited title, keeping original");
        } else {
            item.title = staged.to_string();
        }
        item.edited_title.clear();
        item.is_edit = false;

        debug!(id, title = %item.title, "Committed edit");
        self.persist()
    }

    /// Flips the completion state of an item.
    ///
    /// An incomplete-to-complete transition increments the item's streak
    /// by one and fires a completion notification. The reverse transition
    /// leaves the streak unchanged - the counter is one-way.
    ///
    /// A lookup miss is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if persisting fails.
    pub fn toggle_completed(&mut self, id: u64) -> Result<()> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            trace!(id, "Toggle miss, ignoring");
            return Ok(());
        };

        item.completed = !item.completed;
        if item.completed {
            item.streak += 1;
            debug!(id, streak = item.streak, "Todo completed");
            self.notifier.notify(NotifyEvent::TaskCompleted);
        } else {
            debug!(id, "Todo reopened");
        }

        self.persist()
    }

    /// Computes aggregate statistics over the collection.
    ///
    /// Pure derived read: `streaks` is the maximum streak across all
    /// items (0 when empty), `pomodoros` is the sum of all pomodoro
    /// counters.
    #[must_use]
    pub fn statistics(&self) -> TodoStatistics {
        let completed = self.items.iter().filter(|item| item.completed).count();
        TodoStatistics {
            completed,
            pending: self.items.len() - completed,
            streaks: self.items.iter().map(|item| item.streak).max().unwrap_or(0),
            pomodoros: self.items.iter().map(|item| item.pomodoro_count).sum(),
        }
    }

    /// Returns the display ordering of the collection.
    ///
    /// Stable sort by priority rank (high first), tie-broken by due date
    /// ascending. Items without a due date sort last within their
    /// priority band, so the ordering is deterministic. The underlying
    /// collection's insertion order is unaffected.
    #[must_use]
    pub fn sorted_view(&self) -> Vec<&TodoItem> {
        let mut view: Vec<&TodoItem> = self.items.iter().collect();
        view.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| match (a.due_date, b.due_date) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
        });
        view
    }

    /// Returns the collection in insertion order.
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the number of items in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serializes the whole collection into the durable slot.
    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.items)?;
        self.slot.write(&raw)?;
        trace!(count = self.items.len(), "Persisted todo collection");
        Ok(())
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("items", &self.items)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
