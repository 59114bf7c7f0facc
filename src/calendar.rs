//! Calendar aggregation: day badges, analytics counts, library filtering.
//!
//! Pure functions over the task list. Everything here is a full O(n)
//! recompute triggered whenever the source list changes — fine at the
//! expected data volumes (low thousands of tasks).

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::dates;
use crate::types::{ContentTask, DayBadge, PlatformStat, StatusStat};

/// Normalize a stored `scheduled_date` string to the canonical day key.
///
/// Well-formed dates round-trip through the local-day formatter; anything
/// unparseable buckets under its trimmed raw string so the row stays
/// visible rather than silently vanishing.
fn normalize_day_key(scheduled_date: &str) -> String {
    let trimmed = scheduled_date.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => dates::day_key(date),
        Err(_) => {
            log::warn!("unparseable scheduled_date {trimmed:?}, bucketing verbatim");
            trimmed.to_string()
        }
    }
}

/// Group tasks by local day key and count per key — one badge per distinct
/// day, sorted by date. Order is insignificant to the calendar consumer,
/// which renders by date regardless.
pub fn day_counts(tasks: &[ContentTask]) -> Vec<DayBadge> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for task in tasks {
        *counts.entry(normalize_day_key(&task.scheduled_date)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| DayBadge { date, count })
        .collect()
}

/// Distinct scheduled day keys, for the gap detector.
pub fn scheduled_day_keys(tasks: &[ContentTask]) -> HashSet<String> {
    tasks
        .iter()
        .map(|t| normalize_day_key(&t.scheduled_date))
        .collect()
}

/// Task count per platform name, sorted by name.
pub fn platform_stats(tasks: &[ContentTask]) -> Vec<PlatformStat> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for task in tasks {
        for platform in &task.platforms {
            *counts.entry(platform.name.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(name, count)| PlatformStat { name: name.to_string(), count })
        .collect()
}

/// Task count per status, in lifecycle order. Statuses with no tasks are
/// omitted.
pub fn status_stats(tasks: &[ContentTask]) -> Vec<StatusStat> {
    crate::types::TaskStatus::ALL
        .iter()
        .filter_map(|&status| {
            let count = tasks.iter().filter(|t| t.status == status).count() as u32;
            (count > 0).then_some(StatusStat { status, count })
        })
        .collect()
}

/// Content-library filter: case-insensitive title substring match plus an
/// inclusive scheduled-date range. A task with an unparseable date passes
/// only when no date bound is set.
pub fn filter_tasks<'a>(
    tasks: &'a [ContentTask],
    search: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&'a ContentTask> {
    let needle = search.map(str::to_lowercase);
    tasks
        .iter()
        .filter(|task| {
            if let Some(ref needle) = needle {
                if !task.title.to_lowercase().contains(needle) {
                    return false;
                }
            }
            if from.is_none() && to.is_none() {
                return true;
            }
            let date = match NaiveDate::parse_from_str(task.scheduled_date.trim(), "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => return false,
            };
            if let Some(from) = from {
                if date < from {
                    return false;
                }
            }
            if let Some(to) = to {
                if date > to {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Platform, TaskStatus};

    fn task(id: i64, title: &str, date: &str) -> ContentTask {
        ContentTask {
            id,
            title: title.to_string(),
            notes: None,
            status: TaskStatus::Pending,
            scheduled_date: date.to_string(),
            media_url: None,
            platforms: Vec::new(),
        }
    }

    #[test]
    fn day_counts_groups_and_counts() {
        let tasks = vec![
            task(1, "a", "2025-07-15"),
            task(2, "b", "2025-07-15"),
            task(3, "c", "2025-07-16"),
        ];
        let badges = day_counts(&tasks);
        assert_eq!(
            badges,
            vec![
                DayBadge { date: "2025-07-15".to_string(), count: 2 },
                DayBadge { date: "2025-07-16".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn day_counts_is_pure() {
        let tasks = vec![task(1, "a", "2025-07-15"), task(2, "b", "2025-07-16")];
        assert_eq!(day_counts(&tasks), day_counts(&tasks));
    }

    #[test]
    fn day_counts_normalizes_padding() {
        // "2025-7-5" parses and re-emits zero-padded, so it buckets with
        // the canonical form of the same day.
        let tasks = vec![task(1, "a", "2025-7-5"), task(2, "b", "2025-07-05")];
        let badges = day_counts(&tasks);
        assert_eq!(badges, vec![DayBadge { date: "2025-07-05".to_string(), count: 2 }]);
    }

    #[test]
    fn unparseable_dates_bucket_verbatim() {
        let tasks = vec![task(1, "a", "someday")];
        let badges = day_counts(&tasks);
        assert_eq!(badges, vec![DayBadge { date: "someday".to_string(), count: 1 }]);
    }

    #[test]
    fn platform_stats_count_across_tasks() {
        let mut a = task(1, "a", "2025-07-15");
        a.platforms = vec![
            Platform { id: 1, name: "YouTube".to_string() },
            Platform { id: 2, name: "Instagram".to_string() },
        ];
        let mut b = task(2, "b", "2025-07-16");
        b.platforms = vec![Platform { id: 1, name: "YouTube".to_string() }];
        let stats = platform_stats(&[a, b]);
        assert_eq!(
            stats,
            vec![
                PlatformStat { name: "Instagram".to_string(), count: 1 },
                PlatformStat { name: "YouTube".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn status_stats_in_lifecycle_order_omitting_empty() {
        let mut a = task(1, "a", "2025-07-15");
        a.status = TaskStatus::Published;
        let mut b = task(2, "b", "2025-07-16");
        b.status = TaskStatus::Published;
        let c = task(3, "c", "2025-07-17");
        let stats = status_stats(&[a, b, c]);
        assert_eq!(
            stats,
            vec![
                StatusStat { status: TaskStatus::Pending, count: 1 },
                StatusStat { status: TaskStatus::Published, count: 2 },
            ]
        );
    }

    #[test]
    fn filter_by_title_is_case_insensitive() {
        let tasks = vec![task(1, "Launch Video", "2025-07-15"), task(2, "Recap", "2025-07-16")];
        let hits = filter_tasks(&tasks, Some("launch"), None, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn filter_by_date_range_is_inclusive() {
        let tasks = vec![
            task(1, "a", "2025-07-14"),
            task(2, "b", "2025-07-15"),
            task(3, "c", "2025-07-16"),
        ];
        let from = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 7, 16).unwrap();
        let hits = filter_tasks(&tasks, None, Some(from), Some(to));
        let ids: Vec<i64> = hits.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn filter_excludes_unparseable_dates_when_bounded() {
        let tasks = vec![task(1, "a", "someday")];
        let from = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        assert!(filter_tasks(&tasks, None, Some(from), None).is_empty());
        assert_eq!(filter_tasks(&tasks, None, None, None).len(), 1);
    }
}
