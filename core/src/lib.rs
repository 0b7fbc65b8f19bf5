//! Backfill planning core.
//!
//! Reconciles logged work hours against a revenue target: the
//! allocator turns a revenue shortfall into per-role half-hour quotas,
//! and the distributor spreads assignment hours across business days
//! under the daily cap, driven by an explicit seed.
//!
//! RULES:
//!   - Every function here is pure and synchronous: no I/O, no
//!     globals, no platform randomness.
//!   - Every call owns its capacity map and PRNG; concurrent calls
//!     share nothing.
//!   - All hour quantities leave on the half-hour grid.

pub mod allocation;
pub mod calendar;
pub mod capacity;
pub mod config;
pub mod distribution;
pub mod error;
pub mod expansion;
pub mod hours;
pub mod request;
pub mod rng;
pub mod types;

pub use allocation::{allocate, AllocationOutcome, RoleAllocation, RoleShare};
pub use capacity::Worklog;
pub use config::ScheduleConfig;
pub use distribution::{distribute, Assignment, ScheduleEntry};
pub use error::{PlanError, PlanResult};
pub use expansion::{expand_assignments, TeamMember, WorkItem};
