//! Baseline reconciliation for the default habit catalog.
//!
//! Every full refresh compares the service's habit collection against
//! [`DEFAULT_HABITS`] and creates whichever defaults are missing, so a
//! user always ends up with the complete baseline.
//!
//! ## Behavior
//! - All defaults present: the fetched collection is adopted as-is and
//!   no creation requests are issued.
//! - Some defaults missing: each missing default is created in catalog
//!   order, one request at a time, then the collection is fetched once
//!   more and adopted.
//! - Collection absent or empty: every default is created in catalog
//!   order, then the [`ColdStartPolicy`] decides what is adopted.
//!
//! Creation is sequential so the service never sees two concurrent
//! creations for the same reserved id. Any failed request aborts the
//! pass and is returned to the caller.
//!
//! If the refetch after healing carries no `habits`, the report's
//! `habits` is `None` and the store treats it like any other response
//! without a collection: habits and the `loaded` flag keep their prior
//! values rather than marking the session loaded.
//!
//! ## Usage
//! ```rust,ignore
//! use habitual_core::sync::{BaselineReconciler, ReconcileConfig, Sequencer};
//!
//! let reconciler = BaselineReconciler::with_config(ReconcileConfig::default());
//! let report = reconciler.reconcile(&service, &Sequencer::new()).await?;
//! println!("{}", report.message());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::habit::{default_habits, DefaultHabit, Habit, DEFAULT_HABITS};
use crate::sync::sequence::Sequencer;
use crate::sync::service::HabitService;
use crate::sync::types::{CreateHabitRequest, HabitsResponse, SyncError};

/// What to adopt after seeding every default into an empty account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColdStartPolicy {
    /// Adopt the local catalog without another round trip.
    #[default]
    AdoptCatalog,
    /// Fetch once more and adopt the service's collection.
    Refetch,
}

impl std::str::FromStr for ColdStartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adopt_catalog" => Ok(ColdStartPolicy::AdoptCatalog),
            "refetch" => Ok(ColdStartPolicy::Refetch),
            other => Err(format!(
                "unknown cold start policy '{other}' (expected adopt_catalog or refetch)"
            )),
        }
    }
}

/// Configuration for baseline reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    #[serde(default)]
    pub cold_start: ColdStartPolicy,
}

impl ReconcileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cold_start(mut self, policy: ColdStartPolicy) -> Self {
        self.cold_start = policy;
        self
    }
}

/// Decision derived from a fetched collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcilePlan {
    /// Every default is present.
    UpToDate,
    /// These defaults are missing, in catalog order.
    HealGaps(Vec<DefaultHabit>),
    /// The collection is absent or empty.
    SeedAll,
}

impl ReconcilePlan {
    pub fn kind(&self) -> PlanKind {
        match self {
            ReconcilePlan::UpToDate => PlanKind::UpToDate,
            ReconcilePlan::HealGaps(_) => PlanKind::HealGaps,
            ReconcilePlan::SeedAll => PlanKind::SeedAll,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    UpToDate,
    HealGaps,
    SeedAll,
}

/// Decide what a refresh must do given the fetched collection.
pub fn plan(fetched: &HabitsResponse) -> ReconcilePlan {
    let habits = match fetched.habits.as_deref() {
        Some(habits) if !habits.is_empty() => habits,
        _ => return ReconcilePlan::SeedAll,
    };

    let present: HashSet<&str> = habits.iter().map(|h| h.id.as_str()).collect();
    let missing: Vec<DefaultHabit> = DEFAULT_HABITS
        .iter()
        .filter(|d| !present.contains(d.id))
        .copied()
        .collect();

    if missing.is_empty() {
        ReconcilePlan::UpToDate
    } else {
        ReconcilePlan::HealGaps(missing)
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Which branch the pass took.
    pub plan: PlanKind,
    /// Default ids a creation request was issued for, in order.
    pub created_ids: Vec<String>,
    /// Whether the collection was fetched a second time.
    pub refetched: bool,
    /// Collection to adopt. `None` when the adopting fetch carried no `habits`.
    pub habits: Option<Vec<Habit>>,
    /// Session creation timestamp reported by the adopting fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// Tag of the request that produced `habits`.
    pub seq: u64,
    pub reconciled_at: DateTime<Utc>,
}

impl ReconcileReport {
    /// Check if any defaults were created.
    pub fn has_created(&self) -> bool {
        !self.created_ids.is_empty()
    }

    /// Human-readable summary.
    pub fn message(&self) -> String {
        match self.plan {
            PlanKind::UpToDate => "All default habits present.".to_string(),
            PlanKind::HealGaps => format!(
                "Restored {} missing default habit(s): {}.",
                self.created_ids.len(),
                self.created_ids.join(", ")
            ),
            PlanKind::SeedAll => format!(
                "Seeded {} default habit(s) into an empty account.",
                self.created_ids.len()
            ),
        }
    }
}

/// Applies the default-catalog policy against a [`HabitService`].
#[derive(Debug, Clone, Default)]
pub struct BaselineReconciler {
    config: ReconcileConfig,
}

impl BaselineReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Run one reconciliation pass.
    ///
    /// Tags are drawn from `seq` as requests are issued; the report's
    /// `seq` belongs to whichever request produced the adopted habits.
    pub async fn reconcile(
        &self,
        service: &dyn HabitService,
        seq: &Sequencer,
    ) -> Result<ReconcileReport, SyncError> {
        let fetch_seq = seq.next();
        let fetched = service.fetch_habits().await?;
        let plan = plan(&fetched);
        tracing::debug!(plan = ?plan.kind(), "reconciliation planned");

        let report = match plan {
            ReconcilePlan::UpToDate => ReconcileReport {
                plan: PlanKind::UpToDate,
                created_ids: Vec::new(),
                refetched: false,
                habits: fetched.habits,
                created: fetched.created,
                seq: fetch_seq,
                reconciled_at: Utc::now(),
            },
            ReconcilePlan::HealGaps(missing) => {
                let (created_ids, _) = create_defaults(service, seq, &missing).await?;
                let refetch_seq = seq.next();
                let refetched = service.fetch_habits().await?;
                ReconcileReport {
                    plan: PlanKind::HealGaps,
                    created_ids,
                    refetched: true,
                    habits: refetched.habits,
                    created: refetched.created,
                    seq: refetch_seq,
                    reconciled_at: Utc::now(),
                }
            }
            ReconcilePlan::SeedAll => {
                let (created_ids, last_seq) =
                    create_defaults(service, seq, &DEFAULT_HABITS).await?;
                self.adopt_after_seeding(service, seq, created_ids, last_seq)
                    .await?
            }
        };

        tracing::info!(
            plan = ?report.plan,
            created = report.created_ids.len(),
            refetched = report.refetched,
            "{}",
            report.message()
        );
        Ok(report)
    }

    async fn adopt_after_seeding(
        &self,
        service: &dyn HabitService,
        seq: &Sequencer,
        created_ids: Vec<String>,
        last_create_seq: u64,
    ) -> Result<ReconcileReport, SyncError> {
        let mut report = ReconcileReport {
            plan: PlanKind::SeedAll,
            created_ids,
            refetched: false,
            habits: Some(default_habits()),
            created: None,
            seq: last_create_seq,
            reconciled_at: Utc::now(),
        };

        if self.config.cold_start == ColdStartPolicy::Refetch {
            let refetch_seq = seq.next();
            let refetched = service.fetch_habits().await?;
            report.refetched = true;
            report.seq = refetch_seq;
            report.created = refetched.created;
            if refetched.is_empty() {
                tracing::warn!("refetch after seeding returned no habits, adopting catalog");
            } else {
                report.habits = refetched.habits;
            }
        }

        Ok(report)
    }
}

/// Create each default in order, awaiting every request.
///
/// Returns the created ids and the tag of the last request issued.
async fn create_defaults(
    service: &dyn HabitService,
    seq: &Sequencer,
    defaults: &[DefaultHabit],
) -> Result<(Vec<String>, u64), SyncError> {
    let mut created_ids = Vec::with_capacity(defaults.len());
    let mut last_seq = seq.last_issued();

    for default in defaults {
        let request = CreateHabitRequest {
            name: default.name.to_string(),
            id: Some(default.id.to_string()),
        };
        last_seq = seq.next();
        tracing::debug!(id = default.id, "creating default habit");
        service.create_habit(&request).await?;
        created_ids.push(default.id.to_string());
    }

    Ok((created_ids, last_seq))
}
