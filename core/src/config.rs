//! Distribution tuning knobs.
//!
//! RULE: The planner keeps no ambient or process-global configuration.
//! A ScheduleConfig is constructed explicitly and passed into
//! distribute(); Default carries the production values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Daily loggable cap per member, in hours.
    pub daily_cap_hours: f64,
    /// Hard ceiling on how many calendar weeks one assignment spreads
    /// across.
    pub max_spread_weeks: usize,
    /// Smallest chunk placed on a non-final day. Days with less than
    /// this free are "tiny": usable only once the good days run out.
    pub min_chunk_hours: f64,
    /// Fractional window for per-day draws: every non-final day takes
    /// between `fraction_min` and `fraction_max` of the remainder.
    pub fraction_min: f64,
    pub fraction_max: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_cap_hours: 8.0,
            max_spread_weeks: 3,
            min_chunk_hours: 1.0,
            fraction_min: 0.2,
            fraction_max: 0.8,
        }
    }
}
