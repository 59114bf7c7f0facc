use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A publishing platform from the remote directory (e.g. YouTube, Instagram).
///
/// Name comparison is case-insensitive everywhere; see [`PlatformDirectory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
}

/// Lowercased name → id lookup built from the platform directory.
///
/// Built fresh at the start of each bulk-scheduling session — a stale
/// directory misreports valid platform names as unknown.
#[derive(Debug, Clone, Default)]
pub struct PlatformDirectory {
    by_name: HashMap<String, i64>,
}

impl PlatformDirectory {
    pub fn new(platforms: impl IntoIterator<Item = Platform>) -> Self {
        let by_name = platforms
            .into_iter()
            .map(|p| (p.name.to_lowercase(), p.id))
            .collect();
        Self { by_name }
    }

    /// Case-insensitive lookup of a platform name.
    pub fn resolve(&self, name: &str) -> Option<i64> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Lifecycle status of a content task. Stored as a plain string remotely;
/// unknown values map to `Pending` at the boundary rather than failing the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    Scheduled,
    Published,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::Scheduled,
        TaskStatus::Published,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Scheduled => "Scheduled",
            TaskStatus::Published => "Published",
        }
    }

    /// Parse a remote status string, case-insensitively.
    pub fn parse(raw: &str) -> Option<TaskStatus> {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Some(TaskStatus::Pending),
            "scheduled" => Some(TaskStatus::Scheduled),
            "published" => Some(TaskStatus::Published),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed task with platform names resolved to ids, ready for submission.
///
/// Invariant: `platform_ids` has one entry per source platform name —
/// a name that fails to resolve rejects the whole block, never a subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTask {
    pub title: String,
    #[serde(default)]
    pub notes: String,
    /// Local day key ("YYYY-MM-DD"). Passed verbatim to the store, which
    /// rejects malformed dates — the parser does no date validation.
    pub scheduled_date: String,
    pub platform_ids: Vec<i64>,
    #[serde(default)]
    pub media_url: Option<String>,
}

/// A stored content task, as mapped from the remote row shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub scheduled_date: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

/// Per-day task count backing a calendar badge. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBadge {
    /// Local day key ("YYYY-MM-DD").
    pub date: String,
    pub count: u32,
}

impl DayBadge {
    /// Badge text, e.g. "3 tasks".
    pub fn label(&self) -> String {
        format!("{} task{}", self.count, if self.count == 1 { "" } else { "s" })
    }
}

/// Task count per platform name, for the analytics view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStat {
    pub name: String,
    pub count: u32,
}

/// Task count per status, for the analytics view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStat {
    pub status: TaskStatus,
    pub count: u32,
}
