//! Apply a [`ReconcilePlan`] against the remote service.
//!
//! Every delete runs before any add; within each phase the plan order is
//! kept. A rejected or failed mutation is recorded and the loop moves on.
//! There is no rollback: a pass that stops midway leaves a mixed state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use squadsync_client::MemberService;
use squadsync_core::MemberRecord;

use crate::diff::ReconcilePlan;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Delete,
    Add,
}

/// What happened to one queued mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MutationResult {
    /// The service answered 2xx.
    Applied { status: u16 },
    /// The service answered with any other status.
    Rejected { status: u16 },
    /// No response (connection, TLS, URL).
    Failed { message: String },
    /// Dry run: nothing was sent.
    Skipped,
}

impl MutationResult {
    fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            Self::Applied { status }
        } else {
            Self::Rejected { status }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    pub member: MemberRecord,
    #[serde(flatten)]
    pub result: MutationResult,
}

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub remote_count: usize,
    pub local_count: usize,
    pub outcomes: Vec<MutationOutcome>,
}

impl ReconcileReport {
    pub fn count(&self, kind: MutationKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind == kind).count()
    }

    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, MutationResult::Applied { .. }))
            .count()
    }

    /// Outcomes of `kind` the service accepted.
    pub fn applied_count(&self, kind: MutationKind) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.kind == kind && matches!(o.result, MutationResult::Applied { .. }))
            .count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_failure()).count()
    }

    pub fn is_noop(&self) -> bool {
        self.outcomes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Issue the plan's deletes, then its adds, one blocking call at a time.
///
/// With `dry_run` every mutation is recorded as [`MutationResult::Skipped`]
/// and the service is never called.
pub fn apply<S>(service: &S, plan: &ReconcilePlan, dry_run: bool) -> Vec<MutationOutcome>
where
    S: MemberService + ?Sized,
{
    let mut outcomes = Vec::with_capacity(plan.len());

    tracing::info!(count = plan.to_delete.len(), "deleting members");
    for member in &plan.to_delete {
        let result = if dry_run {
            MutationResult::Skipped
        } else {
            match service.delete_member(&member.id) {
                Ok(status) => MutationResult::from_status(status),
                Err(err) => MutationResult::Failed {
                    message: err.to_string(),
                },
            }
        };
        outcomes.push(record(MutationKind::Delete, member, result));
    }

    tracing::info!(count = plan.to_add.len(), "adding members");
    for member in &plan.to_add {
        let result = if dry_run {
            MutationResult::Skipped
        } else {
            match service.create_member(member) {
                Ok(status) => MutationResult::from_status(status),
                Err(err) => MutationResult::Failed {
                    message: err.to_string(),
                },
            }
        };
        outcomes.push(record(MutationKind::Add, member, result));
    }

    outcomes
}

fn record(kind: MutationKind, member: &MemberRecord, result: MutationResult) -> MutationOutcome {
    let verb = match kind {
        MutationKind::Delete => "delete",
        MutationKind::Add => "add",
    };
    match &result {
        MutationResult::Applied { status } => {
            tracing::info!(member = %member, status, "{verb} applied")
        }
        MutationResult::Rejected { status } => {
            tracing::warn!(member = %member, status, "{verb} rejected by service")
        }
        MutationResult::Failed { message } => {
            tracing::warn!(member = %member, error = %message, "{verb} failed")
        }
        MutationResult::Skipped => tracing::info!(member = %member, "[dry-run] would {verb}"),
    }

    MutationOutcome {
        kind,
        member: member.clone(),
        result,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
