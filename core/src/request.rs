//! Typed boundary payloads.
//!
//! The planning core itself degrades numeric edge cases to zeros, but
//! malformed requests (non-finite numbers, negative rates or hours,
//! inverted date ranges) are rejected here with a typed error before
//! the core ever runs.

use crate::{
    allocation::{AllocationOutcome, RoleShare},
    capacity::Worklog,
    config::ScheduleConfig,
    distribution::{Assignment, ScheduleEntry},
    error::{PlanError, PlanResult},
    expansion::{TeamMember, WorkItem},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn invalid(field: &'static str, reason: impl Into<String>) -> PlanError {
    PlanError::InvalidField {
        field,
        reason: reason.into(),
    }
}

fn check_finite(field: &'static str, value: f64) -> PlanResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite number"))
    }
}

/// Inputs for one allocator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub target_revenue: f64,
    pub current_revenue: f64,
    pub roles: Vec<RoleShare>,
}

impl AllocationRequest {
    pub fn validate(&self) -> PlanResult<()> {
        check_finite("target_revenue", self.target_revenue)?;
        check_finite("current_revenue", self.current_revenue)?;
        validate_roles(&self.roles)
    }
}

fn validate_roles(roles: &[RoleShare]) -> PlanResult<()> {
    for role in roles {
        if !role.billing_rate.is_finite() || role.billing_rate < 0.0 {
            return Err(invalid(
                "billing_rate",
                format!("role '{}' must have a finite, non-negative rate", role.role_id),
            ));
        }
    }
    Ok(())
}

/// Inputs for one distributor invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionRequest {
    pub assignments: Vec<Assignment>,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default)]
    pub worklogs: Vec<Worklog>,
    /// Absent means "caller wants a one-off schedule": the caller
    /// substitutes wall-clock time. The core itself always receives an
    /// explicit seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl DistributionRequest {
    pub fn validate(&self) -> PlanResult<()> {
        if self.to < self.from {
            return Err(PlanError::InvalidRange {
                from: self.from,
                to: self.to,
            });
        }
        validate_assignments(&self.assignments)?;
        validate_worklogs(&self.worklogs)
    }
}

fn validate_assignments(assignments: &[Assignment]) -> PlanResult<()> {
    for assignment in assignments {
        if !assignment.total_hours.is_finite() {
            return Err(invalid(
                "total_hours",
                format!(
                    "assignment for '{}' on item {} must be finite",
                    assignment.account_id, assignment.work_item_id
                ),
            ));
        }
    }
    Ok(())
}

fn validate_worklogs(worklogs: &[Worklog]) -> PlanResult<()> {
    for entry in worklogs {
        if !entry.hours.is_finite() || entry.hours < 0.0 {
            return Err(invalid(
                "worklogs",
                format!(
                    "'{}' on {} must have finite, non-negative hours",
                    entry.account_id, entry.date
                ),
            ));
        }
    }
    Ok(())
}

/// The full pipeline request the plan-runner consumes: revenue figures
/// and roles for the allocator, members and work items for expansion,
/// window and worklogs for the distributor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub target_revenue: f64,
    pub current_revenue: f64,
    pub roles: Vec<RoleShare>,
    pub members: Vec<TeamMember>,
    pub work_items: Vec<WorkItem>,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default)]
    pub worklogs: Vec<Worklog>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub schedule: Option<ScheduleConfig>,
}

impl PlanRequest {
    pub fn validate(&self) -> PlanResult<()> {
        check_finite("target_revenue", self.target_revenue)?;
        check_finite("current_revenue", self.current_revenue)?;
        validate_roles(&self.roles)?;
        if self.to < self.from {
            return Err(PlanError::InvalidRange {
                from: self.from,
                to: self.to,
            });
        }
        for item in &self.work_items {
            if !item.complexity.is_finite() || item.complexity < 0.0 {
                return Err(invalid(
                    "work_items",
                    format!("item {} must have finite, non-negative complexity", item.id),
                ));
            }
        }
        validate_worklogs(&self.worklogs)
    }
}

/// Everything the pipeline produced, in one serializable record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub allocation: AllocationOutcome,
    pub assignments: Vec<Assignment>,
    pub schedule: Vec<ScheduleEntry>,
    /// The seed the schedule was generated with; echoing it back is
    /// what makes the run reproducible.
    pub seed: u64,
}
