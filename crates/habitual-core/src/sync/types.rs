//! Core types for talking to the persistence service.

use serde::{Deserialize, Serialize};

use crate::habit::{Habit, SessionState};

/// Body returned by every habit endpoint.
///
/// `habits` is optional: a response without it is a recoverable no-op,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitsResponse {
    #[serde(default)]
    pub habits: Option<Vec<Habit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

impl HabitsResponse {
    /// Response carrying a habit collection.
    pub fn with_habits(habits: Vec<Habit>) -> Self {
        Self {
            habits: Some(habits),
            created: None,
        }
    }

    /// Response with no habit collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the collection is absent or holds no habits.
    pub fn is_empty(&self) -> bool {
        self.habits.as_ref().map_or(true, Vec::is_empty)
    }
}

/// `POST /habits/create` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    /// Present only when creating a reserved default habit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// `POST /habits/rename` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameHabitRequest {
    pub id: String,
    pub name: String,
}

/// `POST /habits/delete` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteHabitRequest {
    pub id: String,
}

/// Why a store operation left local state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnchangedReason {
    /// The response carried no `habits` field.
    MissingHabits,
    /// A newer response had already been applied.
    Stale,
}

/// Result of a store operation that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The response was applied; carries the new state.
    Applied(SessionState),
    /// The response was absorbed without changing local state.
    Unchanged(UnchangedReason),
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied(_))
    }

    /// The applied state, if any.
    pub fn state(&self) -> Option<&SessionState> {
        match self {
            SyncOutcome::Applied(state) => Some(state),
            SyncOutcome::Unchanged(_) => None,
        }
    }
}

/// Persistence service error types.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}
