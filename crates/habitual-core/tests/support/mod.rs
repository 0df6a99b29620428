//! Shared helpers for integration tests.
//!
//! `MemoryService` behaves like the habit service: it keeps a habit list,
//! answers every call with the full collection and records each call so
//! tests can assert on the exact request sequence.

#![allow(dead_code)]

use async_trait::async_trait;
use habitual_core::habit::Habit;
use habitual_core::sync::{
    CreateHabitRequest, DeleteHabitRequest, HabitService, HabitsResponse, RenameHabitRequest,
    SyncError,
};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch,
    Create { name: String, id: Option<String> },
    Rename { id: String, name: String },
    Delete { id: String },
}

#[derive(Default)]
pub struct MemoryService {
    habits: Mutex<Vec<Habit>>,
    calls: Mutex<Vec<Call>>,
    next_id: Mutex<u64>,
    /// Calls (by kind) whose response should omit `habits`.
    omit_habits_for: Mutex<HashSet<&'static str>>,
    /// 1-based fetch number from which fetches omit `habits`.
    omit_fetch_from: Mutex<Option<usize>>,
    fetch_count: Mutex<usize>,
    /// Append on create even if the id already exists.
    allow_duplicates: bool,
    /// Fail creation for this reserved id.
    fail_create_for: Option<&'static str>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_habits(habits: Vec<Habit>) -> Self {
        Self {
            habits: Mutex::new(habits),
            ..Default::default()
        }
    }

    pub fn allowing_duplicates() -> Self {
        Self {
            allow_duplicates: true,
            ..Default::default()
        }
    }

    pub fn failing_create_for(id: &'static str) -> Self {
        Self {
            fail_create_for: Some(id),
            ..Default::default()
        }
    }

    /// Make `kind` ("fetch", "create", "rename", "delete") answer without `habits`.
    pub fn omit_habits_for(&self, kind: &'static str) {
        self.omit_habits_for.lock().unwrap().insert(kind);
    }

    /// Make the `n`th fetch and every later one answer without `habits`.
    pub fn omit_habits_from_fetch(&self, n: usize) {
        *self.omit_fetch_from.lock().unwrap() = Some(n);
    }

    pub fn server_habits(&self) -> Vec<Habit> {
        self.habits.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create { .. }))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn respond(&self, kind: &'static str) -> HabitsResponse {
        if self.omit_habits_for.lock().unwrap().contains(kind) {
            return HabitsResponse::empty();
        }
        HabitsResponse::with_habits(self.server_habits())
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HabitService for MemoryService {
    async fn fetch_habits(&self) -> Result<HabitsResponse, SyncError> {
        self.record(Call::Fetch);
        let count = {
            let mut fetch_count = self.fetch_count.lock().unwrap();
            *fetch_count += 1;
            *fetch_count
        };
        let omit_from = *self.omit_fetch_from.lock().unwrap();
        if omit_from.is_some_and(|n| count >= n) {
            return Ok(HabitsResponse::empty());
        }
        Ok(self.respond("fetch"))
    }

    async fn create_habit(&self, request: &CreateHabitRequest) -> Result<HabitsResponse, SyncError> {
        self.record(Call::Create {
            name: request.name.clone(),
            id: request.id.clone(),
        });
        if request.id.as_deref().is_some() && request.id.as_deref() == self.fail_create_for {
            return Err(SyncError::Status {
                endpoint: "/habits/create".to_string(),
                status: 502,
            });
        }

        {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let id = request
                .id
                .clone()
                .unwrap_or_else(|| format!("srv-{}", *next_id));
            let mut habits = self.habits.lock().unwrap();
            if self.allow_duplicates || !habits.iter().any(|h| h.id == id) {
                habits.push(Habit {
                    created: Some(1_700_000_000_000 + *next_id as i64),
                    ..Habit::new(id, request.name.clone())
                });
            }
        }
        Ok(self.respond("create"))
    }

    async fn rename_habit(&self, request: &RenameHabitRequest) -> Result<HabitsResponse, SyncError> {
        self.record(Call::Rename {
            id: request.id.clone(),
            name: request.name.clone(),
        });
        for habit in self.habits.lock().unwrap().iter_mut() {
            if habit.id == request.id {
                habit.name = request.name.clone();
            }
        }
        Ok(self.respond("rename"))
    }

    async fn delete_habit(&self, request: &DeleteHabitRequest) -> Result<HabitsResponse, SyncError> {
        self.record(Call::Delete {
            id: request.id.clone(),
        });
        self.habits.lock().unwrap().retain(|h| h.id != request.id);
        Ok(self.respond("delete"))
    }
}

/// Deterministic session ids for tests.
pub fn fixed_session_id(len: usize) -> String {
    "t".repeat(len)
}
