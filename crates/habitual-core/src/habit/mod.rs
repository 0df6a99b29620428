//! Habit records and the per-session view of them.
//!
//! A [`Habit`] is the wire shape the persistence service returns. A
//! [`SessionState`] is the client's last-known-good snapshot of the
//! current user's habits, replaced wholesale on every applied response.

pub mod catalog;
pub mod id;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use catalog::{default_habits, is_default_id, DefaultHabit, DEFAULT_HABITS};
pub use id::{IdGenerator, RandomIdGenerator, SESSION_ID_LEN};

/// A trackable recurring goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable identifier. Server-generated, or one of the reserved default ids.
    pub id: String,
    /// Display text.
    pub name: String,
    /// Completion markers in the order the service reports them.
    #[serde(default)]
    pub completed: Vec<String>,
    /// Creation timestamp (ms since epoch), set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

impl Habit {
    /// Create a habit with no completions and no creation timestamp.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed: Vec::new(),
            created: None,
        }
    }
}

/// The client's view of the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Client-generated session identifier. Never changes after construction.
    pub id: String,
    /// False until the first response is applied; never reverts.
    pub loaded: bool,
    /// Current habits, unique by id.
    pub habits: Vec<Habit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

impl SessionState {
    /// Fresh, unloaded state for a new session.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            loaded: false,
            habits: Vec::new(),
            created: None,
        }
    }
}

/// Drop habits whose id was already seen, keeping the first occurrence.
///
/// Returns the normalized list and the ids that were dropped.
pub fn dedup_by_id(habits: Vec<Habit>) -> (Vec<Habit>, Vec<String>) {
    let mut seen = HashSet::with_capacity(habits.len());
    let mut dropped = Vec::new();
    let mut unique = Vec::with_capacity(habits.len());

    for habit in habits {
        if seen.insert(habit.id.clone()) {
            unique.push(habit);
        } else {
            dropped.push(habit.id);
        }
    }

    (unique, dropped)
}
