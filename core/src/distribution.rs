//! Calendar Distributor — spreads assignment hours across business
//! days under the daily cap, with seeded pseudo-randomness.
//!
//! Assignments are processed in list order against one shared capacity
//! map: each assignment sees the capacity earlier ones consumed. That
//! order dependency is load-bearing behavior, not an accident;
//! callers wanting fairness across assignments shuffle the list
//! themselves before calling.
//!
//! Placement per assignment:
//!   1. Partition business days into good (>= the chunk floor free)
//!      and tiny (some capacity, below the floor). Full days are
//!      unusable.
//!   2. Nothing free anywhere -> the whole amount becomes one overflow
//!      entry on the first day in range.
//!   3. Pick 1..=3 calendar weeks of good days, biased toward the
//!      fewest that could absorb the total, chosen by seeded shuffle.
//!   4. Walk the chosen weeks' days chronologically, placing a random
//!      20–80% bite of the remainder on each day and the rest on the
//!      last. Uneven on purpose: thin identical slivers on every day
//!      do not look like human bookings.
//!   5. Any remainder cascades: other good days, then tiny days, then
//!      a single overflow entry.
//!
//! Same seed + same inputs -> bit-identical schedule.

use crate::{
    calendar::{business_days, group_by_week},
    capacity::{CapacityMap, Worklog},
    config::ScheduleConfig,
    error::PlanResult,
    hours::{round2, snap_half_down, snap_to_half},
    rng::PlanRng,
    types::{AccountId, WorkItemId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hours a member should book against one work item. The total is a
/// target, not a guarantee: the distributor may miss it only through
/// the explicit overflow path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub account_id: AccountId,
    pub work_item_id: WorkItemId,
    pub total_hours: f64,
}

/// One scheduled block: hours for a member on a work item on a date.
/// `overflow` marks hours placed in violation of the daily cap, the
/// last resort when every day in range is already full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub account_id: AccountId,
    pub work_item_id: WorkItemId,
    pub date: NaiveDate,
    /// Half-hour multiple, > 0.
    pub hours: f64,
    pub overflow: bool,
}

pub fn distribute(
    assignments: &[Assignment],
    from: NaiveDate,
    to: NaiveDate,
    worklogs: &[Worklog],
    seed: u64,
    config: &ScheduleConfig,
) -> PlanResult<Vec<ScheduleEntry>> {
    let days = business_days(from, to)?;
    let mut capacity = CapacityMap::build(config.daily_cap_hours, worklogs);
    let mut rng = PlanRng::new(seed);
    let mut schedule = Vec::new();

    for assignment in assignments {
        // Nothing to schedule; zero-hour rows are never emitted.
        if assignment.total_hours <= 0.0 {
            continue;
        }
        place_assignment(
            assignment,
            &days,
            &mut capacity,
            &mut rng,
            config,
            &mut schedule,
        );
    }

    Ok(schedule)
}

fn place_assignment(
    assignment: &Assignment,
    days: &[NaiveDate],
    capacity: &mut CapacityMap,
    rng: &mut PlanRng,
    config: &ScheduleConfig,
    schedule: &mut Vec<ScheduleEntry>,
) {
    let account = &assignment.account_id;

    let mut good_days = Vec::new();
    let mut tiny_days = Vec::new();
    for &day in days {
        let free = capacity.remaining(account, day);
        if free >= config.min_chunk_hours {
            good_days.push(day);
        } else if free > 0.0 {
            tiny_days.push(day);
        }
    }

    // Every day already booked solid: the whole amount becomes one
    // overflow entry on the first day in range.
    if good_days.is_empty() && tiny_days.is_empty() {
        log::warn!(
            "{account}: no free capacity in range, overflowing {:.1} h onto {}",
            assignment.total_hours,
            days[0]
        );
        schedule.push(ScheduleEntry {
            account_id: account.clone(),
            work_item_id: assignment.work_item_id,
            date: days[0],
            hours: snap_to_half(assignment.total_hours).max(0.5),
            overflow: true,
        });
        return;
    }

    let mut remaining = assignment.total_hours;

    let selected_days = select_week_days(account, &good_days, remaining, capacity, rng, config);
    remaining = fill_days(
        assignment,
        &selected_days,
        remaining,
        capacity,
        rng,
        config,
        FillMode::Fractional,
        schedule,
    );

    // Capacity ran out faster than the week pick assumed: sweep the
    // good days outside the chosen weeks.
    if remaining > 0.0 {
        let mut leftover: Vec<NaiveDate> = good_days
            .iter()
            .copied()
            .filter(|day| !selected_days.contains(day))
            .collect();
        rng.shuffle(&mut leftover);
        remaining = fill_days(
            assignment,
            &leftover,
            remaining,
            capacity,
            rng,
            config,
            FillMode::Greedy,
            schedule,
        );
    }

    if remaining > 0.0 {
        let mut tiny = tiny_days;
        rng.shuffle(&mut tiny);
        remaining = fill_days(
            assignment,
            &tiny,
            remaining,
            capacity,
            rng,
            config,
            FillMode::Greedy,
            schedule,
        );
    }

    // Last resort: every day in range is full. The cap is violated
    // once, on one day.
    if remaining > 0.0 {
        let mut fallback = days.to_vec();
        rng.shuffle(&mut fallback);
        let date = fallback
            .iter()
            .copied()
            .find(|&day| capacity.remaining(account, day) >= 0.0)
            .unwrap_or(days[0]);
        log::warn!("{account}: overflowing residual {remaining:.1} h onto {date}");
        schedule.push(ScheduleEntry {
            account_id: account.clone(),
            work_item_id: assignment.work_item_id,
            date,
            hours: snap_to_half(remaining).max(0.5),
            overflow: true,
        });
    }
}

/// Choose which calendar weeks this assignment lands in, and return
/// their good days chronologically.
///
/// The week count is at least enough that the single highest-capacity
/// week could not trivially absorb everything, at most
/// `max_spread_weeks`, with a squared draw biasing toward the minimum:
/// most assignments cluster into few weeks instead of spreading
/// maximally thin.
fn select_week_days(
    account: &str,
    good_days: &[NaiveDate],
    total_hours: f64,
    capacity: &CapacityMap,
    rng: &mut PlanRng,
    config: &ScheduleConfig,
) -> Vec<NaiveDate> {
    let weeks = group_by_week(good_days);
    if weeks.is_empty() {
        return Vec::new();
    }

    let max_week_capacity = weeks
        .iter()
        .map(|(_, days)| {
            days.iter()
                .map(|&day| capacity.remaining(account, day))
                .sum::<f64>()
        })
        .fold(0.0, f64::max);

    let min_weeks = if max_week_capacity > 0.0 {
        ((total_hours / max_week_capacity).ceil() as usize).clamp(1, weeks.len())
    } else {
        1
    };
    let max_weeks = config.max_spread_weeks.min(weeks.len()).max(min_weeks);

    let t = rng.next_f64() * rng.next_f64();
    let span = max_weeks - min_weeks + 1;
    let count = min_weeks + ((t * span as f64) as usize).min(span - 1);

    let mut order: Vec<usize> = (0..weeks.len()).collect();
    rng.shuffle(&mut order);
    let mut chosen: Vec<usize> = order.into_iter().take(count).collect();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .flat_map(|week| weeks[week].1.iter().copied())
        .collect()
}

enum FillMode {
    /// Random 20–80% bite of the remainder per day, full remainder on
    /// the last day or once the remainder drops to the chunk floor.
    Fractional,
    /// Take as much as the day holds, every day.
    Greedy,
}

#[allow(clippy::too_many_arguments)]
fn fill_days(
    assignment: &Assignment,
    days: &[NaiveDate],
    mut remaining: f64,
    capacity: &mut CapacityMap,
    rng: &mut PlanRng,
    config: &ScheduleConfig,
    mode: FillMode,
    schedule: &mut Vec<ScheduleEntry>,
) -> f64 {
    let account = &assignment.account_id;

    for (index, &day) in days.iter().enumerate() {
        if remaining <= 0.0 {
            break;
        }
        let free = capacity.remaining(account, day);
        if free <= 0.0 {
            continue;
        }

        let last = index + 1 == days.len();
        let take_all = matches!(mode, FillMode::Greedy)
            || last
            || remaining <= config.min_chunk_hours;

        let target = if take_all {
            remaining
        } else {
            let fraction = rng.in_range(config.fraction_min, config.fraction_max);
            (remaining * fraction)
                .max(config.min_chunk_hours)
                .min(remaining)
        };

        let mut chunk = snap_to_half(target.min(free));
        if chunk > free {
            // Snapping up would breach the cap; the grid yields instead.
            chunk = snap_half_down(free);
        }
        if chunk <= 0.0 {
            continue;
        }

        schedule.push(ScheduleEntry {
            account_id: account.clone(),
            work_item_id: assignment.work_item_id,
            date: day,
            hours: chunk,
            overflow: false,
        });
        capacity.commit(account, day, chunk);
        remaining = round2(remaining - chunk).max(0.0);
    }

    remaining
}
