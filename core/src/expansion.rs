//! Expands an allocation outcome into concrete per-member,
//! per-work-item assignments, weighted by item complexity.
//!
//! This is the glue step between the two core components: the
//! allocator answers "how many hours per member", this answers
//! "against which work items", and the distributor answers "on which
//! days".

use crate::{
    allocation::AllocationOutcome,
    distribution::Assignment,
    hours::{round2, snap_to_half},
    types::{AccountId, WorkItemId},
};
use serde::{Deserialize, Serialize};

/// A schedulable member of one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub account_id: AccountId,
    pub role_id: String,
}

/// A work item hours can be booked against. `complexity` is the
/// user-supplied weight deciding how much of a member's quota the item
/// attracts relative to its peers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub complexity: f64,
}

/// One assignment per (member, work item) with positive hours.
///
/// Each member of a role splits that role's per-member quota across
/// the work items proportionally to complexity, snapped to half hours.
/// The heaviest item takes the remainder, so a member's quota survives
/// the snapping intact. Items with non-positive weight and roles with
/// zero hours contribute nothing.
pub fn expand_assignments(
    outcome: &AllocationOutcome,
    members: &[TeamMember],
    items: &[WorkItem],
) -> Vec<Assignment> {
    let mut weighted: Vec<&WorkItem> = items.iter().filter(|item| item.complexity > 0.0).collect();
    if weighted.is_empty() {
        return Vec::new();
    }
    // Ascending by weight, heaviest last: the drift bucket.
    weighted.sort_by(|a, b| a.complexity.total_cmp(&b.complexity).then(a.id.cmp(&b.id)));
    let total_weight: f64 = weighted.iter().map(|item| item.complexity).sum();

    let mut assignments = Vec::new();
    for role in &outcome.roles {
        if role.hours_per_member <= 0.0 {
            continue;
        }
        for member in members.iter().filter(|m| m.role_id == role.role_id) {
            let mut booked = 0.0;
            for (index, item) in weighted.iter().enumerate() {
                let last = index + 1 == weighted.len();
                // Capping each share at the unbooked quota keeps many
                // small items snapping up from overrunning the member's
                // total.
                let hours = if last {
                    round2(role.hours_per_member - booked)
                } else {
                    snap_to_half(role.hours_per_member * item.complexity / total_weight)
                        .min(round2(role.hours_per_member - booked))
                };
                if hours <= 0.0 {
                    continue;
                }
                booked = round2(booked + hours);
                assignments.push(Assignment {
                    account_id: member.account_id.clone(),
                    work_item_id: item.id,
                    total_hours: hours,
                });
            }
        }
    }
    assignments
}
