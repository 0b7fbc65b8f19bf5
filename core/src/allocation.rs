//! Hour Allocator — converts a revenue shortfall into per-role,
//! per-member hour quotas on the half-hour grid.
//!
//! Two passes:
//!   1. Proportional split of the delta by role weight
//!      (billing_rate × member_count), snapped to half hours at both
//!      the role total and the per-member level.
//!   2. Greedy reconciliation: repeatedly apply the single ±0.5 h
//!      per-member adjustment that most shrinks the gap between
//!      achieved and requested delta revenue, until no adjustment
//!      improves it.
//!
//! There is no error path. Zero weight, zero rates, zero members,
//! empty role lists and negative deltas all degrade to zero-valued
//! results.

use crate::hours::snap_to_half;
use serde::{Deserialize, Serialize};

/// One role's participation in the revenue-gap effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleShare {
    pub role_id: String,
    pub role_name: String,
    /// Currency per hour, >= 0.
    pub billing_rate: f64,
    pub member_count: u32,
}

/// A role's computed quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAllocation {
    pub role_id: String,
    pub role_name: String,
    pub billing_rate: f64,
    pub member_count: u32,
    /// Half-hour multiple, never negative.
    pub hours_per_member: f64,
    pub total_hours: f64,
    pub revenue_contribution: f64,
}

impl RoleAllocation {
    fn from_share(share: &RoleShare, hours_per_member: f64) -> Self {
        let total_hours = hours_per_member * share.member_count as f64;
        Self {
            role_id: share.role_id.clone(),
            role_name: share.role_name.clone(),
            billing_rate: share.billing_rate,
            member_count: share.member_count,
            hours_per_member,
            total_hours,
            revenue_contribution: total_hours * share.billing_rate,
        }
    }

    fn set_hours_per_member(&mut self, hours: f64) {
        self.hours_per_member = hours;
        self.total_hours = hours * self.member_count as f64;
        self.revenue_contribution = self.total_hours * self.billing_rate;
    }
}

/// Full allocator output for one invocation. Never persisted;
/// recomputed on demand whenever the inputs change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub roles: Vec<RoleAllocation>,
    /// Sum of revenue contributions actually achieved.
    pub total_delta_revenue: f64,
    pub achieved_revenue: f64,
}

/// Reconciliation is a local search where every applied step strictly
/// shrinks the error, so it terminates on its own; the cap only guards
/// against a numeric surprise.
const MAX_RECONCILE_STEPS: usize = 10_000;

/// Tolerance below which an adjustment no longer counts as an
/// improvement. Keeps float noise from driving extra steps.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

pub fn allocate(target_revenue: f64, current_revenue: f64, roles: &[RoleShare]) -> AllocationOutcome {
    let delta = target_revenue - current_revenue;
    let total_weight: f64 = roles
        .iter()
        .map(|r| r.billing_rate * r.member_count as f64)
        .sum();

    let mut allocations: Vec<RoleAllocation> = roles
        .iter()
        .map(|role| {
            let hours_per_member =
                if total_weight == 0.0 || role.billing_rate == 0.0 || role.member_count == 0 {
                    // Unpaid or empty roles never receive hours, and a
                    // zero total weight would divide by zero below.
                    0.0
                } else {
                    let weight = role.billing_rate * role.member_count as f64;
                    let revenue_share = delta * (weight / total_weight);
                    let raw_total = revenue_share / role.billing_rate;
                    let rounded_total = snap_to_half(raw_total);
                    snap_to_half(rounded_total / role.member_count as f64).max(0.0)
                };
            RoleAllocation::from_share(role, hours_per_member)
        })
        .collect();

    reconcile(&mut allocations, delta);

    let achieved_delta: f64 = allocations.iter().map(|a| a.revenue_contribution).sum();
    AllocationOutcome {
        roles: allocations,
        total_delta_revenue: achieved_delta,
        achieved_revenue: current_revenue + achieved_delta,
    }
}

/// Per-role snapping drifts the achieved revenue away from the exact
/// delta. Walk it back with single half-hour steps: each round, find
/// the one (role, ±0.5 h/member) move that reduces the error most,
/// apply it, repeat until nothing improves. Greedy, not globally
/// optimal; steps are bounded and real deltas are a few steps away.
fn reconcile(allocations: &mut [RoleAllocation], delta: f64) {
    for _ in 0..MAX_RECONCILE_STEPS {
        let achieved: f64 = allocations.iter().map(|a| a.revenue_contribution).sum();
        let error = (achieved - delta).abs();

        let mut best: Option<(usize, f64, f64)> = None;
        for (index, alloc) in allocations.iter().enumerate() {
            if alloc.billing_rate == 0.0 || alloc.member_count == 0 {
                continue;
            }
            for step in [0.5, -0.5] {
                let candidate = alloc.hours_per_member + step;
                if candidate < 0.0 {
                    continue;
                }
                let candidate_contribution =
                    candidate * alloc.member_count as f64 * alloc.billing_rate;
                let candidate_error =
                    (achieved - alloc.revenue_contribution + candidate_contribution - delta).abs();
                let beats_best = best.map_or(true, |(_, _, e)| candidate_error < e);
                if candidate_error < error - IMPROVEMENT_EPSILON && beats_best {
                    best = Some((index, candidate, candidate_error));
                }
            }
        }

        match best {
            Some((index, hours, new_error)) => {
                log::debug!(
                    "reconcile: {} -> {:.1} h/member (error {:.2} -> {:.2})",
                    allocations[index].role_id,
                    hours,
                    error,
                    new_error
                );
                allocations[index].set_hours_per_member(hours);
            }
            None => break,
        }
    }
}
