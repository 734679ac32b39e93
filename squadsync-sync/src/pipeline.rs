//! Reconciliation pass entrypoint shared by `squadsync sync` and `squadsync diff`.

use std::path::Path;

use chrono::Utc;

use squadsync_client::MemberService;
use squadsync_core::{payload, roster, MemberRecord};

use crate::diff::{plan, ReconcilePlan};
use crate::reconcile::{apply, ReconcileReport};
use crate::SyncError;

/// Both rosters for one pass.
#[derive(Debug, Clone)]
pub struct Rosters {
    pub remote: Vec<MemberRecord>,
    pub local: Vec<MemberRecord>,
}

impl Rosters {
    pub fn plan(&self) -> ReconcilePlan {
        plan(&self.remote, &self.local)
    }
}

/// Fetch and parse the remote roster, then load the local one.
///
/// Fails on a non-200 fetch, a malformed payload, an unreadable or malformed
/// local file, and a local roster with no members.
pub fn collect<S>(service: &S, roster_path: &Path) -> Result<Rosters, SyncError>
where
    S: MemberService + ?Sized,
{
    let body = service.list_members()?;
    let remote = payload::parse_members(&body).map_err(SyncError::Payload)?;
    tracing::info!(count = remote.len(), "remote roster parsed");

    let local = roster::load_roster_at(roster_path)?;
    if local.is_empty() {
        return Err(SyncError::EmptyRoster {
            path: roster_path.to_path_buf(),
        });
    }
    tracing::info!(count = local.len(), "local roster parsed");

    Ok(Rosters { remote, local })
}

/// Run one reconciliation pass: collect, diff, delete, add.
pub fn run<S>(service: &S, roster_path: &Path, dry_run: bool) -> Result<ReconcileReport, SyncError>
where
    S: MemberService + ?Sized,
{
    let started_at = Utc::now();
    let rosters = collect(service, roster_path)?;
    let plan = rosters.plan();
    tracing::info!(
        delete = plan.to_delete.len(),
        add = plan.to_add.len(),
        "reconcile plan computed"
    );

    let outcomes = apply(service, &plan, dry_run);
    let report = ReconcileReport {
        started_at,
        finished_at: Utc::now(),
        dry_run,
        remote_count: rosters.remote.len(),
        local_count: rosters.local.len(),
        outcomes,
    };
    tracing::info!(
        applied = report.applied(),
        failures = report.failures(),
        "update complete"
    );
    Ok(report)
}
