//! Content-gap detection over a rolling window of upcoming days.
//!
//! A gap is an upcoming day with zero scheduled tasks, excluding one
//! configured weekday (Sunday by default — the planner treats it as an
//! intentional rest day). Membership tests use the canonical local day key
//! from [`crate::dates`]; deriving the key any other way (UTC ISO
//! truncation in particular) disagrees with task scheduling near midnight
//! in non-UTC locales.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::dates;

/// Gap-detection window settings.
#[derive(Debug, Clone)]
pub struct GapConfig {
    /// How many days ahead to scan, starting at the reference date.
    pub window_days: u32,
    /// Weekday never reported as a gap.
    pub excluded_weekday: Weekday,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self { window_days: 7, excluded_weekday: Weekday::Sun }
    }
}

/// Scan `reference..reference + window_days` and report the days with no
/// scheduled content, as human-readable labels in chronological order.
///
/// Pure: identical inputs yield identical output. Callers pass today as
/// the reference date and suppress rendering when the result is empty.
pub fn find_gaps(
    scheduled_day_keys: &HashSet<String>,
    reference: NaiveDate,
    config: &GapConfig,
) -> Vec<String> {
    let mut gaps = Vec::new();
    for offset in 0..config.window_days {
        let Some(day) = reference.checked_add_days(Days::new(offset as u64)) else {
            break;
        };
        if day.weekday() == config.excluded_weekday {
            continue;
        }
        if !scheduled_day_keys.contains(&dates::day_key(day)) {
            gaps.push(dates::gap_label(day));
        }
    }
    gaps
}
