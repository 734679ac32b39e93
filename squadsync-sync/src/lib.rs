//! # squadsync-sync
//!
//! Diff engine and reconciliation driver.
//!
//! Call [`pipeline::run`] for one full pass (fetch, parse, diff, apply), or
//! [`pipeline::collect`] plus [`diff::plan`] to inspect pending changes
//! without touching the remote side.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod reconcile;

pub use diff::{plan, ReconcilePlan};
pub use error::SyncError;
pub use reconcile::{apply, MutationKind, MutationOutcome, MutationResult, ReconcileReport};
