//! Matrix snapshot comparison.
//!
//! The delta between two builds is the principal mechanism for catching
//! silent coverage loss: a requirement whose edge flips from covered to
//! uncovered after a re-generation run shows up as a status change.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use suture_core::model::RequirementId;
use suture_core::registry::ControlKey;

use super::types::{CoverageStatus, TraceLink, TraceMatrix};

/// A `(control, requirement)` pair whose coverage status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub control: Option<ControlKey>,
    pub requirement: RequirementId,
    pub from: CoverageStatus,
    pub to: CoverageStatus,
}

/// Added, removed, and status-changed edges between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixDelta {
    pub added: Vec<TraceLink>,
    pub removed: Vec<TraceLink>,
    pub status_changes: Vec<StatusChange>,
}

impl MatrixDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.status_changes.is_empty()
    }

    /// Status changes where previously covered edges lost coverage.
    pub fn coverage_regressions(&self) -> Vec<&StatusChange> {
        self.status_changes
            .iter()
            .filter(|c| c.from == CoverageStatus::Covered && c.to != CoverageStatus::Covered)
            .collect()
    }
}

type Pair = (Option<ControlKey>, RequirementId);

fn pair_statuses(matrix: &TraceMatrix) -> FxHashMap<Pair, CoverageStatus> {
    let mut statuses: FxHashMap<Pair, CoverageStatus> = FxHashMap::default();
    for link in matrix.links() {
        let pair = (link.control.clone(), link.requirement);
        // Covered < Uncovered < Unmapped: keep the strongest status
        statuses
            .entry(pair)
            .and_modify(|s| *s = (*s).min(link.status))
            .or_insert(link.status);
    }
    statuses
}

/// Compare two matrix snapshots.
pub fn diff(old: &TraceMatrix, new: &TraceMatrix) -> MatrixDelta {
    let old_links: BTreeSet<&TraceLink> = old.links().iter().collect();
    let new_links: BTreeSet<&TraceLink> = new.links().iter().collect();

    let added = new_links
        .difference(&old_links)
        .map(|l| (*l).clone())
        .collect();
    let removed = old_links
        .difference(&new_links)
        .map(|l| (*l).clone())
        .collect();

    let old_status = pair_statuses(old);
    let new_status = pair_statuses(new);

    let mut status_changes: Vec<StatusChange> = old_status
        .iter()
        .filter_map(|(pair, &from)| {
            let &to = new_status.get(pair)?;
            (from != to).then(|| StatusChange {
                control: pair.0.clone(),
                requirement: pair.1,
                from,
                to,
            })
        })
        .collect();
    status_changes.sort_by(|a, b| (&a.control, a.requirement).cmp(&(&b.control, b.requirement)));

    MatrixDelta {
        added,
        removed,
        status_changes,
    }
}
