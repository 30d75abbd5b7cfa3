//! Integration tests for the write-through persistence contract.
//!
//! These tests exercise the store against the real file-backed slot to
//! verify that the durable value always reflects the latest mutation and
//! that a fresh process reproduces the in-memory state field-for-field.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use tickdo::notifier::NoopNotifier;
use tickdo::storage::{FileSlot, StorageSlot, SLOT_FILE_NAME};
use tickdo::store::TodoStore;
use tickdo::types::{Category, Priority, TodoStatistics};

fn store_in(dir: &TempDir) -> TodoStore {
    let slot = FileSlot::new(dir.path().to_path_buf());
    TodoStore::load(Box::new(slot), Arc::new(NoopNotifier))
}

#[test]
fn mutation_sequence_round_trips_through_the_slot() {
    let dir = TempDir::new().unwrap();

    let mut store = store_in(&dir);
    let due = Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap();
    let a = store
        .add("Buy milk", Category::Shopping, Priority::High, None, Some(25))
        .unwrap()
        .unwrap();
    let b = store
        .add("Report", Category::Work, Priority::Medium, Some(due), None)
        .unwrap()
        .unwrap();
    store.toggle_completed(a).unwrap();
    store.delete(b).unwrap();

    // A fresh store over the same directory sees the exact final state.
    let reloaded = store_in(&dir);
    assert_eq!(reloaded.items(), store.items());

    let item = reloaded.get(a).unwrap();
    assert_eq!(item.title, "Buy milk");
    assert!(item.completed);
    assert_eq!(item.streak, 1);
    assert_eq!(item.timer_duration, Some(25));
    assert!(reloaded.get(b).is_none());
}

#[test]
fn first_run_starts_empty_and_creates_slot_on_first_mutation() {
    let dir = TempDir::new().unwrap();
    let slot_path = dir.path().join(SLOT_FILE_NAME);

    let mut store = store_in(&dir);
    assert!(store.is_empty());
    assert!(!slot_path.exists());

    store
        .add("First", Category::Personal, Priority::Low, None, None)
        .unwrap()
        .unwrap();
    assert!(slot_path.exists());
}

#[test]
fn corrupt_slot_falls_back_to_empty_collection() {
    let dir = TempDir::new().unwrap();
    let slot = FileSlot::new(dir.path().to_path_buf());
    slot.write("this is not json").unwrap();

    let store = store_in(&dir);
    assert!(store.is_empty());
    assert_eq!(store.statistics(), TodoStatistics::default());
}

#[test]
fn corrupt_slot_is_replaced_on_next_mutation() {
    let dir = TempDir::new().unwrap();
    let slot = FileSlot::new(dir.path().to_path_buf());
    slot.write("{ truncated").unwrap();

    let mut store = store_in(&dir);
    store
        .add("Recovered", Category::Personal, Priority::Medium, None, None)
        .unwrap()
        .unwrap();

    let reloaded = store_in(&dir);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.items()[0].title, "Recovered");
}

#[test]
fn ids_stay_unique_across_restarts() {
    let dir = TempDir::new().unwrap();

    let mut store = store_in(&dir);
    let a = store
        .add("one", Category::Personal, Priority::Medium, None, None)
        .unwrap()
        .unwrap();

    let mut store = store_in(&dir);
    let b = store
        .add("two", Category::Personal, Priority::Medium, None, None)
        .unwrap()
        .unwrap();

    assert!(b > a, "Restart must not reuse ids");
}

#[test]
fn edit_state_round_trips_when_committed() {
    let dir = TempDir::new().unwrap();

    let mut store = store_in(&dir);
    let id = store
        .add("Draft title", Category::Work, Priority::Medium, None, None)
        .unwrap()
        .unwrap();
    store.begin_edit(id);
    store.change_edited_title(id, "Final title");
    store.commit_edit(id).unwrap();

    let reloaded = store_in(&dir);
    let item = reloaded.get(id).unwrap();
    assert_eq!(item.title, "Final title");
    assert!(!item.is_edit);
}
