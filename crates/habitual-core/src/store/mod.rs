//! The habit store: single source of truth for the session's habits.
//!
//! Every mutation goes through the persistence service and local state is
//! only ever replaced with a snapshot the service returned. Subscribers
//! receive whole-state replacements over a `watch` channel.
//!
//! ## Ordering
//! Each request is tagged with a sequence number when it is issued. A
//! response is applied only if its tag is newer than the last applied
//! one, so a slow response can never overwrite a newer snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use crate::habit::{
    dedup_by_id, Habit, IdGenerator, RandomIdGenerator, SessionState, SESSION_ID_LEN,
};
use crate::storage::Config;
use crate::sync::{
    BaselineReconciler, CreateHabitRequest, DeleteHabitRequest, HabitService, HabitsResponse,
    HttpHabitService, ReconcileConfig, ReconcileReport, RenameHabitRequest, Sequencer, SyncError,
    SyncOutcome, UnchangedReason,
};

struct StoreInner {
    state: SessionState,
    last_applied: u64,
}

/// Client-side cache of the current user's habits.
pub struct HabitStore {
    service: Arc<dyn HabitService>,
    reconciler: BaselineReconciler,
    sequencer: Sequencer,
    inner: Mutex<StoreInner>,
    publisher: watch::Sender<SessionState>,
}

impl HabitStore {
    /// Create a store with the default reconciliation policy.
    ///
    /// The session id is drawn from `ids` here and never again.
    pub fn new(service: Arc<dyn HabitService>, ids: &dyn IdGenerator) -> Self {
        Self::with_config(service, ids, ReconcileConfig::default())
    }

    /// Create a store with a custom reconciliation policy.
    pub fn with_config(
        service: Arc<dyn HabitService>,
        ids: &dyn IdGenerator,
        config: ReconcileConfig,
    ) -> Self {
        let state = SessionState::new(ids.generate(SESSION_ID_LEN));
        let (publisher, _) = watch::channel(state.clone());
        tracing::debug!(session = %state.id, "habit store created");

        Self {
            service,
            reconciler: BaselineReconciler::with_config(config),
            sequencer: Sequencer::new(),
            inner: Mutex::new(StoreInner {
                state,
                last_applied: 0,
            }),
            publisher,
        }
    }

    /// Build a store backed by the HTTP service described in `config`.
    pub fn from_config(config: &Config) -> Result<Self, SyncError> {
        let service = HttpHabitService::from_config(&config.service)?;
        Ok(Self::with_config(
            Arc::new(service),
            &RandomIdGenerator,
            config.reconcile.clone(),
        ))
    }

    /// Receive every state the store applies from now on.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.publisher.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn session_id(&self) -> String {
        self.lock().state.id.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().state.loaded
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.lock().state.habits.clone()
    }

    /// Create a habit. `id` is only passed for reserved default habits.
    pub async fn create_habit(
        &self,
        name: &str,
        id: Option<&str>,
    ) -> Result<SyncOutcome, SyncError> {
        let request = CreateHabitRequest {
            name: name.to_string(),
            id: id.map(str::to_string),
        };
        let seq = self.sequencer.next();
        let resp = self.service.create_habit(&request).await?;
        Ok(self.apply(seq, resp, "create"))
    }

    pub async fn rename_habit(&self, id: &str, name: &str) -> Result<SyncOutcome, SyncError> {
        let request = RenameHabitRequest {
            id: id.to_string(),
            name: name.to_string(),
        };
        let seq = self.sequencer.next();
        let resp = self.service.rename_habit(&request).await?;
        Ok(self.apply(seq, resp, "rename"))
    }

    pub async fn delete_habit(&self, id: &str) -> Result<SyncOutcome, SyncError> {
        let request = DeleteHabitRequest { id: id.to_string() };
        let seq = self.sequencer.next();
        let resp = self.service.delete_habit(&request).await?;
        Ok(self.apply(seq, resp, "delete"))
    }

    /// Full refresh with baseline reconciliation.
    pub async fn update_user_info(&self) -> Result<SyncOutcome, SyncError> {
        self.update_user_info_with_report()
            .await
            .map(|(outcome, _)| outcome)
    }

    /// Full refresh, also returning what the reconciler did.
    pub async fn update_user_info_with_report(
        &self,
    ) -> Result<(SyncOutcome, ReconcileReport), SyncError> {
        let report = self
            .reconciler
            .reconcile(self.service.as_ref(), &self.sequencer)
            .await?;
        let resp = HabitsResponse {
            habits: report.habits.clone(),
            created: report.created,
        };
        let outcome = self.apply(report.seq, resp, "refresh");
        Ok((outcome, report))
    }

    fn apply(&self, seq: u64, resp: HabitsResponse, op: &'static str) -> SyncOutcome {
        let Some(habits) = resp.habits else {
            tracing::warn!(op, seq, "response carried no habits, keeping local state");
            return SyncOutcome::Unchanged(UnchangedReason::MissingHabits);
        };

        let mut inner = self.lock();
        if seq <= inner.last_applied {
            tracing::warn!(
                op,
                seq,
                last_applied = inner.last_applied,
                "discarding out-of-order response"
            );
            return SyncOutcome::Unchanged(UnchangedReason::Stale);
        }

        let (habits, dropped) = dedup_by_id(habits);
        if !dropped.is_empty() {
            tracing::warn!(op, ?dropped, "dropped duplicate habit ids from response");
        }

        inner.state.habits = habits;
        if resp.created.is_some() {
            inner.state.created = resp.created;
        }
        inner.state.loaded = true;
        inner.last_applied = seq;

        let state = inner.state.clone();
        self.publisher.send_replace(state.clone());
        tracing::info!(op, seq, habits = state.habits.len(), "applied habit snapshot");
        SyncOutcome::Applied(state)
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
