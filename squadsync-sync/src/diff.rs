//! Membership delta between the remote and local rosters.
//!
//! Membership is tested per element over the composite key with a linear
//! scan, so the cost is O(n×m). Duplicates are not collapsed: a record that
//! appears twice on one side and not at all on the other yields two entries.

use serde::Serialize;

use squadsync_core::MemberRecord;

/// Changes needed to make the remote roster mirror the local one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcilePlan {
    /// Remote records with no equal local record, in remote order.
    pub to_delete: Vec<MemberRecord>,
    /// Local records with no equal remote record, in local order.
    pub to_add: Vec<MemberRecord>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty()
    }

    /// Number of mutations the plan will issue.
    pub fn len(&self) -> usize {
        self.to_delete.len() + self.to_add.len()
    }
}

/// Compute the deletes and adds that turn `remote` into `local`.
pub fn plan(remote: &[MemberRecord], local: &[MemberRecord]) -> ReconcilePlan {
    let to_delete = missing_from(remote, local);
    for record in &to_delete {
        tracing::debug!(member = %record, "queued for delete");
    }
    let to_add = missing_from(local, remote);
    for record in &to_add {
        tracing::debug!(member = %record, "queued for add");
    }

    ReconcilePlan { to_delete, to_add }
}

fn missing_from(source: &[MemberRecord], other: &[MemberRecord]) -> Vec<MemberRecord> {
    source
        .iter()
        .filter(|record| !other.contains(record))
        .cloned()
        .collect()
}
