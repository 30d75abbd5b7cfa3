//! Durable key-value slot for the todo collection.
//!
//! The store persists the entire collection as one JSON value under a
//! single fixed key. This module abstracts that slot behind the
//! [`StorageSlot`] trait so the store can be exercised in tests without
//! touching the filesystem.
//!
//! # Implementations
//!
//! - [`FileSlot`]: one file (`todos.json`) inside the configured data
//!   directory. This is what the binary uses.
//! - [`MemorySlot`]: an in-process slot for tests.
//!
//! # Contract
//!
//! Reads are best-effort: a missing slot reads as `None`. Writes replace
//! the entire value synchronously; there is no batching and no partial
//! update. Callers never see a schema - the slot holds an opaque string.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, trace};

/// File name of the durable slot inside the data directory.
pub const SLOT_FILE_NAME: &str = "todos.json";

/// Errors that can occur reading or writing the durable slot.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying filesystem I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A durable slot holding a single string value under a fixed key.
///
/// # Semantics
///
/// - [`read`](Self::read) returns `None` when the slot has never been
///   written (first run).
/// - [`write`](Self::write) replaces the whole value and must be durable
///   by the time it returns.
pub trait StorageSlot {
    /// Reads the current slot value, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the slot exists but cannot be read.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replaces the slot value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be written.
    fn write(&self, value: &str) -> Result<(), StorageError>;
}

// Lets callers keep a handle to a slot they hand to the store.
impl<T: StorageSlot + ?Sized> StorageSlot for Arc<T> {
    fn read(&self) -> Result<Option<String>, StorageError> {
        (**self).read()
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        (**self).write(value)
    }
}

/// File-backed slot: `<data_dir>/todos.json`.
///
/// The parent directory is created on first write. Writes go through a
/// temporary file in the same directory followed by a rename, so a crash
/// mid-write leaves the previous value intact.
#[derive(Debug)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Creates a slot rooted at the given data directory.
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tickdo::storage::FileSlot;
    ///
    /// let slot = FileSlot::new(PathBuf::from("/tmp/tickdo"));
    /// assert!(slot.path().ends_with("todos.json"));
    /// ```
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(SLOT_FILE_NAME),
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                trace!(path = %self.path.display(), bytes = contents.len(), "Read slot");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Slot file not found, treating as empty");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &self.path)?;

        trace!(path = %self.path.display(), bytes = value.len(), "Wrote slot");
        Ok(())
    }
}

/// In-memory slot for tests.
///
/// # Example
///
/// ```
/// use tickdo::storage::{MemorySlot, StorageSlot};
///
/// let slot = MemorySlot::default();
/// assert_eq!(slot.read().unwrap(), None);
///
/// slot.write("[]").unwrap();
/// assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    /// Creates a slot pre-seeded with a value, as if a previous process
    /// had written it.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.lock().expect("slot lock poisoned").clone())
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        *self.value.lock().expect("slot lock poisoned") = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_slot_starts_empty() {
        let slot = MemorySlot::default();
        assert_eq!(slot.read().unwrap(), None);
    }

    #[test]
    fn memory_slot_write_then_read() {
        let slot = MemorySlot::default();
        slot.write(r#"[{"id":1}]"#).unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some(r#"[{"id":1}]"#));
    }

    #[test]
    fn memory_slot_write_replaces_value() {
        let slot = MemorySlot::with_value("old");
        slot.write("new").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn file_slot_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("does-not-exist"));
        assert!(slot.read().unwrap().is_none());
    }

    #[test]
    fn file_slot_write_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested").join("data"));

        slot.write("[]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_slot_write_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().to_path_buf());

        slot.write("first").unwrap();
        slot.write("second").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn file_slot_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().to_path_buf());

        slot.write("[]").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(SLOT_FILE_NAME)]);
    }

    #[test]
    fn file_slot_path_points_at_slot_file() {
        let slot = FileSlot::new(PathBuf::from("/data"));
        assert_eq!(slot.path(), Path::new("/data/todos.json"));
    }
}
