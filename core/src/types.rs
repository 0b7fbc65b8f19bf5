//! Shared primitive types used across the planning core.

/// A team member's account identifier, as issued by the external
/// time-tracking system.
pub type AccountId = String;

/// Numeric id of the work item (issue) hours are booked against.
pub type WorkItemId = i64;
