//! Persistence service synchronization layer.
//!
//! Talks to the remote habit service, tags requests with sequence
//! numbers, and keeps the default habit catalog present server-side.

pub mod reconciler;
pub mod sequence;
pub mod service;
pub mod types;


pub use reconciler::{
    plan, BaselineReconciler, ColdStartPolicy, PlanKind, ReconcileConfig, ReconcilePlan,
    ReconcileReport,
};
pub use sequence::Sequencer;
pub use service::{HabitService, HttpHabitService};
pub use types::{
    CreateHabitRequest, DeleteHabitRequest, HabitsResponse, RenameHabitRequest, SyncError,
    SyncOutcome, UnchangedReason,
};
