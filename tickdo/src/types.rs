//! Core data types for the todo collection.
//!
//! This module defines [`TodoItem`], the sole persisted entity, along with
//! its [`Priority`] and [`Category`] enums and the [`TodoStatistics`]
//! aggregate returned by the store.
//!
//! # Persisted Format
//!
//! Items are serialized as a JSON array using camelCase field names:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "title": "Buy milk",
//!     "editedTitle": "",
//!     "isEdit": false,
//!     "completed": false,
//!     "priority": "high",
//!     "category": "shopping",
//!     "dueDate": null,
//!     "timerDuration": 25,
//!     "streak": 0,
//!     "pomodoroCount": 0,
//!     "createdAt": "2026-08-29T12:00:00Z"
//!   }
//! ]
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing a [`Priority`] or [`Category`] from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    /// Which enum failed to parse ("priority" or "category").
    pub kind: &'static str,
    /// The rejected input value.
    pub value: String,
    /// Comma-separated list of accepted values.
    pub expected: &'static str,
}

/// Priority of a todo item.
///
/// Priorities determine the primary sort key of the display ordering:
/// high before medium before low.
///
/// # Example
///
/// ```
/// use tickdo::types::Priority;
///
/// assert!(Priority::High.rank() < Priority::Medium.rank());
/// assert!(Priority::Medium.rank() < Priority::Low.rank());
/// assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Lowest urgency, sorted last.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Highest urgency, sorted first.
    High,
}

impl Priority {
    /// Returns the sort rank for this priority.
    ///
    /// High sorts before medium sorts before low, so lower ranks come
    /// first in ascending order.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

/// Category of a todo item.
///
/// Categories are pure metadata: they do not affect ordering or
/// statistics, only display grouping in the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Personal errands and tasks.
    #[default]
    Personal,
    /// Work-related tasks.
    Work,
    /// Shopping list entries.
    Shopping,
    /// Health and fitness tasks.
    Health,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Shopping => "shopping",
            Category::Health => "health",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(Category::Personal),
            "work" => Ok(Category::Work),
            "shopping" => Ok(Category::Shopping),
            "health" => Ok(Category::Health),
            other => Err(ParseEnumError {
                kind: "category",
                value: other.to_string(),
                expected: "personal, work, shopping, health",
            }),
        }
    }
}

/// A single todo item.
///
/// Items are created by [`TodoStore::add`](crate::store::TodoStore::add),
/// mutated in place by the store's toggle/edit operations, and removed
/// permanently by delete. There is no soft-delete state.
///
/// # Invariants
///
/// - `id` is unique across the live collection and immutable once assigned
/// - `streak` never decreases
/// - `completed` and `is_edit` are independent; both may be true at once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Unique, monotonically assigned identifier. The sole equality key
    /// for all lookups and mutations.
    pub id: u64,

    /// Display text. Non-empty after trimming; enforced on creation.
    pub title: String,

    /// Staging value for inline edits. Only meaningful while `is_edit`
    /// is true; committed into `title` (or discarded) on save.
    #[serde(default)]
    pub edited_title: String,

    /// Whether the item is currently in inline-edit mode.
    #[serde(default)]
    pub is_edit: bool,

    /// Whether the item has been marked complete.
    pub completed: bool,

    /// Urgency level; primary sort key of the display ordering.
    pub priority: Priority,

    /// Grouping metadata; does not affect ordering.
    pub category: Category,

    /// Optional due timestamp; secondary sort key of the display ordering.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    /// Optional countdown duration in minutes. `None` disables the timer
    /// affordance for this item.
    #[serde(default)]
    pub timer_duration: Option<u32>,

    /// Cumulative count of incomplete-to-complete transitions. One-way:
    /// toggling back to incomplete does not decrement it.
    #[serde(default)]
    pub streak: u32,

    /// Reserved counter; no operation currently increments it.
    #[serde(default)]
    pub pomodoro_count: u32,

    /// Creation timestamp, set once and never mutated.
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new item with the given identity and metadata.
    ///
    /// The remaining fields take their creation defaults: not completed,
    /// not in edit mode, zero streak, zero pomodoro count, `created_at`
    /// set to the current time.
    ///
    /// The title is stored as given; trimming and emptiness validation
    /// are the store's responsibility.
    #[must_use]
    pub fn new(
        id: u64,
        title: String,
        category: Category,
        priority: Priority,
        due_date: Option<DateTime<Utc>>,
        timer_duration: Option<u32>,
    ) -> Self {
        Self {
            id,
            title,
            edited_title: String::new(),
            is_edit: false,
            completed: false,
            priority,
            category,
            due_date,
            timer_duration,
            streak: 0,
            pomodoro_count: 0,
            created_at: Utc::now(),
        }
    }
}

/// Aggregate statistics over the todo collection.
///
/// Returned by [`TodoStore::statistics`](crate::store::TodoStore::statistics).
/// A pure derived read; computing it never mutates or persists anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TodoStatistics {
    /// Number of items currently marked complete.
    pub completed: usize,
    /// Number of items not marked complete.
    pub pending: usize,
    /// Maximum streak across all items, or 0 for an empty collection.
    pub streaks: u32,
    /// Sum of all pomodoro counters.
    pub pomodoros: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn priority_rank_ordering() {
        assert_eq!(Priority::High.rank(), 0);
        assert_eq!(Priority::Medium.rank(), 1);
        assert_eq!(Priority::Low.rank(), 2);
    }

    #[test]
    fn priority_display_round_trip() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            let parsed: Priority = p.to_string().parse().unwrap();
            assert_eq!(parsed, p);
        }
    }

    #[test]
    fn priority_parse_invalid() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.kind, "priority");
        assert_eq!(
            err.to_string(),
            "invalid priority: 'urgent' (expected one of: low, medium, high)"
        );
    }

    #[test]
    fn category_display_round_trip() {
        for c in [
            Category::Personal,
            Category::Work,
            Category::Shopping,
            Category::Health,
        ] {
            let parsed: Category = c.to_string().parse().unwrap();
            assert_eq!(parsed, c);
        }
    }

    #[test]
    fn category_parse_invalid() {
        let err = "chores".parse::<Category>().unwrap_err();
        assert_eq!(err.kind, "category");
    }

    #[test]
    fn new_item_creation_defaults() {
        let item = TodoItem::new(
            7,
            "Buy milk".to_string(),
            Category::Shopping,
            Priority::High,
            None,
            Some(25),
        );

        assert_eq!(item.id, 7);
        assert_eq!(item.title, "Buy milk");
        assert!(item.edited_title.is_empty());
        assert!(!item.is_edit);
        assert!(!item.completed);
        assert_eq!(item.streak, 0);
        assert_eq!(item.pomodoro_count, 0);
        assert_eq!(item.timer_duration, Some(25));
        assert_eq!(item.due_date, None);
    }

    #[test]
    fn item_serializes_with_camel_case_fields() {
        let mut item = TodoItem::new(
            1,
            "Task".to_string(),
            Category::Work,
            Priority::Medium,
            None,
            None,
        );
        item.created_at = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["editedTitle"], "");
        assert_eq!(json["isEdit"], false);
        assert_eq!(json["dueDate"], serde_json::Value::Null);
        assert_eq!(json["timerDuration"], serde_json::Value::Null);
        assert_eq!(json["pomodoroCount"], 0);
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["category"], "work");
    }

    #[test]
    fn item_round_trips_through_json() {
        let item = TodoItem::new(
            3,
            "Stretch".to_string(),
            Category::Health,
            Priority::Low,
            Some(Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap()),
            Some(10),
        );

        let json = serde_json::to_string(&item).unwrap();
        let back: TodoItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn item_deserializes_with_missing_optional_fields() {
        // Older stored records may predate the edit/timer fields.
        let json = r#"{
            "id": 1,
            "title": "Legacy",
            "completed": false,
            "priority": "low",
            "category": "personal",
            "createdAt": "2026-08-29T12:00:00Z"
        }"#;

        let item: TodoItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "Legacy");
        assert!(item.edited_title.is_empty());
        assert!(!item.is_edit);
        assert_eq!(item.due_date, None);
        assert_eq!(item.timer_duration, None);
        assert_eq!(item.streak, 0);
        assert_eq!(item.pomodoro_count, 0);
    }

    #[test]
    fn statistics_default_is_all_zeros() {
        let stats = TodoStatistics::default();
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.streaks, 0);
        assert_eq!(stats.pomodoros, 0);
    }
}
