//! Business-day calendar over an inclusive date window.
//!
//! Dates are plain calendar dates in one fixed frame. No timezone
//! conversion happens anywhere in this crate, which keeps weekday
//! arithmetic exact.

use crate::error::{PlanError, PlanResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// All Monday–Friday dates in [from, to], chronological.
///
/// `to < from` is InvalidRange. A well-ordered window containing no
/// weekday at all (a lone Saturday, say) is NoBusinessDays: nothing
/// can be scheduled in it, and no fallback date is ever guessed.
pub fn business_days(from: NaiveDate, to: NaiveDate) -> PlanResult<Vec<NaiveDate>> {
    if to < from {
        return Err(PlanError::InvalidRange { from, to });
    }

    let mut days = Vec::new();
    let mut current = from;
    while current <= to {
        if is_business_day(current) {
            days.push(current);
        }
        current = current + Duration::days(1);
    }

    if days.is_empty() {
        return Err(PlanError::NoBusinessDays { from, to });
    }
    Ok(days)
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The Monday of the calendar week `date` falls in.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Group chronologically sorted days into Monday-anchored calendar
/// weeks, preserving order inside each week and across weeks.
pub fn group_by_week(days: &[NaiveDate]) -> Vec<(NaiveDate, Vec<NaiveDate>)> {
    let mut weeks: Vec<(NaiveDate, Vec<NaiveDate>)> = Vec::new();
    for &day in days {
        let anchor = week_start(day);
        match weeks.last_mut() {
            Some((start, bucket)) if *start == anchor => bucket.push(day),
            _ => weeks.push((anchor, vec![day])),
        }
    }
    weeks
}
