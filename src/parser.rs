//! Bulk scheduling text parser.
//!
//! Input is free-form text where each task is a block of lines separated
//! by one or more blank lines:
//!
//! ```text
//! First Awesome Video
//! Platforms: YouTube, Instagram
//! Notes: Remember to add the end screen.
//! Date: 2025-07-15
//!
//! Second Post
//! Platforms: Facebook
//! Date: 2025-07-16
//! ```
//!
//! Blocks are parsed independently — one invalid block never aborts the
//! rest. Validation failures are collected as human-readable problems, not
//! errors. The platform directory is injected by the caller, which keeps
//! parsing pure and testable without a store.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{PlatformDirectory, ResolvedTask};

/// Result of one bulk-parsing pass: tasks ready for submission, plus the
/// per-block problems encountered along the way.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub tasks: Vec<ResolvedTask>,
    pub problems: Vec<String>,
}

// Blank-line block separator: one or more whitespace-only lines.
fn re_block_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

/// Case-insensitive ASCII prefix strip, returning the untouched remainder.
fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    if line.len() >= prefix.len()
        && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

/// Parse bulk text into submission-ready tasks.
///
/// Rules per block:
/// - fewer than 3 lines: skipped silently (cannot hold title + platforms + date)
/// - line 0 is the title; remaining lines are scanned for the prefixes
///   `platforms:`, `notes:`, `date:` (case-insensitive, first match per
///   prefix wins, unrecognized lines ignored)
/// - missing title, platforms, or date: block reported as a problem
/// - every platform name must resolve in the directory or the whole block
///   is rejected — no partial platform sets
///
/// Duplicate platform names are preserved as duplicate ids. The date value
/// is taken verbatim; the store rejects malformed dates.
pub fn parse_bulk(raw: &str, platforms: &PlatformDirectory) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return outcome;
    }

    for block in re_block_separator().split(trimmed) {
        parse_block(block, platforms, &mut outcome);
    }

    outcome
}

fn parse_block(block: &str, platforms: &PlatformDirectory, outcome: &mut ParseOutcome) {
    let lines: Vec<&str> = block.trim().lines().collect();
    if lines.len() < 3 {
        // Not enough lines to hold title + platforms + date. Skipped
        // silently, matching the contract: this is noise, not a problem.
        log::debug!("skipping short block ({} lines)", lines.len());
        return;
    }

    let title = lines[0].trim();

    let mut platform_names: Option<Vec<String>> = None;
    let mut notes: Option<String> = None;
    let mut scheduled_date: Option<String> = None;

    for line in &lines[1..] {
        let line = line.trim();
        if let Some(value) = strip_prefix_ci(line, "platforms:") {
            if platform_names.is_none() {
                platform_names =
                    Some(value.split(',').map(|p| p.trim().to_string()).collect());
            }
        } else if let Some(value) = strip_prefix_ci(line, "notes:") {
            if notes.is_none() {
                notes = Some(value.trim().to_string());
            }
        } else if let Some(value) = strip_prefix_ci(line, "date:") {
            if scheduled_date.is_none() {
                scheduled_date = Some(value.trim().to_string());
            }
        }
        // Anything else is ignored.
    }

    let names = platform_names.unwrap_or_default();
    let date = scheduled_date.unwrap_or_default();

    if title.is_empty() || names.is_empty() || date.is_empty() {
        outcome.problems.push(format!(
            "Skipping an invalid task block. Ensure Title, Platforms, and Date are provided. Block: \"{title}\""
        ));
        return;
    }

    let ids: Vec<i64> = names.iter().filter_map(|n| platforms.resolve(n)).collect();
    if ids.len() != names.len() {
        // One unresolved name rejects the whole block — a shortened id set
        // would silently post to the wrong platform subset.
        outcome.problems.push(format!(
            "One or more platform names in block \"{title}\" are invalid. Please check spelling."
        ));
        return;
    }

    outcome.tasks.push(ResolvedTask {
        title: title.to_string(),
        notes: notes.unwrap_or_default(),
        scheduled_date: date,
        platform_ids: ids,
        media_url: None,
    });
}
