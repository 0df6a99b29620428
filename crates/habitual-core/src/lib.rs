//! # Habitual Core Library
//!
//! Client-side reconciliation engine for the Habitual habit tracker. It
//! keeps a local cache of the user's habits, synchronizes it against a
//! remote persistence service, and makes sure the fixed set of default
//! habits always exists for the user. The `habitual` CLI is a thin layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Habit Store**: holds the session's habits and mediates every change
//!   through the persistence service, publishing whole-state replacements
//! - **Baseline Reconciler**: runs on every full refresh and recreates any
//!   missing default habit
//! - **Sync**: the persistence service contract, its HTTP client and the
//!   sequence numbers that keep responses in order
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`HabitStore`]: the store
//! - [`BaselineReconciler`]: default-catalog policy
//! - [`HabitService`]: trait for the persistence service
//! - [`Config`]: application configuration management

pub mod error;
pub mod habit;
pub mod storage;
pub mod store;
pub mod sync;

pub use error::{ConfigError, CoreError};
pub use habit::{Habit, IdGenerator, RandomIdGenerator, SessionState, DEFAULT_HABITS};
pub use storage::Config;
pub use store::HabitStore;
pub use sync::{
    BaselineReconciler, ColdStartPolicy, HabitService, HttpHabitService, ReconcileConfig,
    ReconcileReport, SyncError, SyncOutcome, UnchangedReason,
};
