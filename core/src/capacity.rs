//! Remaining daily capacity per member.
//!
//! A CapacityMap is built fresh for every distribution call from the
//! caller's worklog snapshot, mutated in place while hours are
//! committed, and discarded when the call returns. It is the only
//! mutable state the distributor carries, and it never leaves the call.

use crate::types::AccountId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hours already committed for a member on a date, as reported by the
/// external time-tracking source. Read-only snapshot; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worklog {
    pub account_id: AccountId,
    pub date: NaiveDate,
    pub hours: f64,
}

/// account → date → remaining hours. Entries default to the daily cap
/// minus already-logged hours, floored at 0.
pub struct CapacityMap {
    daily_cap: f64,
    remaining: HashMap<AccountId, HashMap<NaiveDate, f64>>,
}

impl CapacityMap {
    pub fn build(daily_cap: f64, worklogs: &[Worklog]) -> Self {
        let mut logged: HashMap<AccountId, HashMap<NaiveDate, f64>> = HashMap::new();
        for entry in worklogs {
            *logged
                .entry(entry.account_id.clone())
                .or_default()
                .entry(entry.date)
                .or_insert(0.0) += entry.hours;
        }

        let remaining = logged
            .into_iter()
            .map(|(account, days)| {
                let days = days
                    .into_iter()
                    .map(|(date, hours)| (date, (daily_cap - hours).max(0.0)))
                    .collect();
                (account, days)
            })
            .collect();

        Self { daily_cap, remaining }
    }

    /// Remaining loggable hours for a member on a date.
    pub fn remaining(&self, account: &str, date: NaiveDate) -> f64 {
        self.remaining
            .get(account)
            .and_then(|days| days.get(&date))
            .copied()
            .unwrap_or(self.daily_cap)
    }

    /// Commit `hours` on a date. The entry is floored at 0, never
    /// driven negative.
    pub fn commit(&mut self, account: &str, date: NaiveDate, hours: f64) {
        let current = self.remaining(account, date);
        self.remaining
            .entry(account.to_string())
            .or_default()
            .insert(date, (current - hours).max(0.0));
    }
}
