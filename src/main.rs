//! kwata-planner CLI — content calendar from the terminal.
//!
//! Subcommands:
//! - `schedule <file>` — bulk-schedule tasks from a text file
//! - `calendar`        — per-day task badges
//! - `gaps`            — upcoming days with no scheduled content
//! - `day [date]`      — tasks for one day (default today)
//! - `library`         — browse all tasks with search/date filters
//! - `status`/`delete` — single-task mutations
//! - `stats`           — tasks per platform and per status
//!
//! Store connection comes from `~/.kwata-planner/config.json` or the
//! `SUPABASE_URL` / `SUPABASE_ANON_KEY` environment variables.

use std::env;
use std::fs;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};

use kwata_planner::store::ContentStore;
use kwata_planner::submit::BulkError;
use kwata_planner::types::TaskStatus;
use kwata_planner::{calendar, config, dates, gaps, submit};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("schedule") => cmd_schedule(args.get(1).map(String::as_str)).await,
        Some("calendar") => cmd_calendar().await,
        Some("gaps") => cmd_gaps().await,
        Some("day") => cmd_day(args.get(1).map(String::as_str)).await,
        Some("library") => cmd_library(&args[1..]).await,
        Some("status") => cmd_status(&args[1..]).await,
        Some("delete") => cmd_delete(args.get(1).map(String::as_str)).await,
        Some("stats") => cmd_stats().await,
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: kwata-planner <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  schedule <file>   Bulk-schedule tasks from a text file");
    eprintln!("  calendar          Per-day task counts");
    eprintln!("  gaps              Upcoming days with no scheduled content");
    eprintln!("  day [YYYY-MM-DD]  Tasks for one day (default today)");
    eprintln!("  library [--search TERM] [--from DATE] [--to DATE]");
    eprintln!("                    Browse all tasks, filtered");
    eprintln!("  status <id> <pending|scheduled|published>");
    eprintln!("                    Update one task's status");
    eprintln!("  delete <id>       Delete one task");
    eprintln!("  stats             Tasks per platform and per status");
}

fn open_store() -> Result<ContentStore, String> {
    let config = config::load_config()?;
    ContentStore::new(&config.store_config()).map_err(|e| e.to_string())
}

async fn cmd_schedule(path: Option<&str>) -> Result<(), String> {
    let path = path.ok_or("Usage: kwata-planner schedule <file>")?;
    let raw = fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))?;

    let store = open_store()?;
    // Refreshed per session — a stale directory misreports valid names.
    let directory = store.platform_directory().await.map_err(|e| e.to_string())?;

    match submit::run_bulk_schedule(&raw, &directory, &store).await {
        Ok(report) => {
            for problem in &report.problems {
                eprintln!("Warning: {problem}");
            }
            println!("{} task(s) have been successfully scheduled!", report.scheduled);
            Ok(())
        }
        Err(BulkError::NoValidTasks { problems }) => {
            for problem in &problems {
                eprintln!("Warning: {problem}");
            }
            Err("No valid tasks could be parsed from the text.".to_string())
        }
        Err(BulkError::Submission { failure, problems }) => {
            for problem in &problems {
                eprintln!("Warning: {problem}");
            }
            if failure.submitted > 0 {
                eprintln!(
                    "{} task(s) were already scheduled before the failure and remain in place.",
                    failure.submitted
                );
            }
            Err(failure.to_string())
        }
    }
}

async fn cmd_calendar() -> Result<(), String> {
    let store = open_store()?;
    let tasks = store.list_tasks().await.map_err(|e| e.to_string())?;
    let badges = calendar::day_counts(&tasks);
    if badges.is_empty() {
        println!("No tasks scheduled.");
        return Ok(());
    }
    for badge in badges {
        println!("{}  {}", badge.date, badge.label());
    }
    Ok(())
}

async fn cmd_gaps() -> Result<(), String> {
    let store = open_store()?;
    let tasks = store.list_tasks().await.map_err(|e| e.to_string())?;
    let scheduled = calendar::scheduled_day_keys(&tasks);
    let config = gaps::GapConfig::default();
    let report = gaps::find_gaps(&scheduled, Local::now().date_naive(), &config);
    if report.is_empty() {
        println!("No content gaps in the next {} days.", config.window_days);
        return Ok(());
    }
    println!("Content gaps detected! You have no content scheduled for:");
    for label in report {
        println!("  - {label}");
    }
    Ok(())
}

async fn cmd_day(date: Option<&str>) -> Result<(), String> {
    let day = match date {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let key = dates::day_key(day);

    let store = open_store()?;
    let tasks = store.tasks_for_day(&key).await.map_err(|e| e.to_string())?;
    if tasks.is_empty() {
        println!("No tasks scheduled for {key}.");
        return Ok(());
    }
    println!("{}:", dates::gap_label(day));
    for task in tasks {
        let platforms: Vec<&str> = task.platforms.iter().map(|p| p.name.as_str()).collect();
        println!("  [{}] {} ({})", task.status, task.title, platforms.join(", "));
        if let Some(notes) = task.notes.as_deref().filter(|n| !n.is_empty()) {
            println!("      {notes}");
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date {raw:?}, expected YYYY-MM-DD"))
}

async fn cmd_library(args: &[String]) -> Result<(), String> {
    let mut search: Option<&str> = None;
    let mut from: Option<NaiveDate> = None;
    let mut to: Option<NaiveDate> = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("Missing value for {flag}"))?;
        match flag.as_str() {
            "--search" => search = Some(value.as_str()),
            "--from" => from = Some(parse_date(value)?),
            "--to" => to = Some(parse_date(value)?),
            other => return Err(format!("Unknown option {other:?}")),
        }
    }

    let store = open_store()?;
    let tasks = store.list_tasks().await.map_err(|e| e.to_string())?;
    let hits = calendar::filter_tasks(&tasks, search, from, to);
    if hits.is_empty() {
        println!("No tasks match your filters.");
        return Ok(());
    }
    for task in hits {
        let platforms: Vec<&str> = task.platforms.iter().map(|p| p.name.as_str()).collect();
        println!(
            "#{:<5} {}  [{}] {} ({})",
            task.id,
            task.scheduled_date,
            task.status,
            task.title,
            platforms.join(", ")
        );
    }
    Ok(())
}

async fn cmd_status(args: &[String]) -> Result<(), String> {
    let (id, status) = match args {
        [id, status] => (id, status),
        _ => return Err("Usage: kwata-planner status <id> <pending|scheduled|published>".to_string()),
    };
    let id: i64 = id.parse().map_err(|_| format!("Invalid task id {id:?}"))?;
    let status = TaskStatus::parse(status)
        .ok_or_else(|| format!("Unknown status {status:?}, expected pending, scheduled, or published"))?;

    let store = open_store()?;
    store.update_status(id, status).await.map_err(|e| e.to_string())?;
    println!("Task {id} is now {status}.");
    Ok(())
}

async fn cmd_delete(id: Option<&str>) -> Result<(), String> {
    let id = id.ok_or("Usage: kwata-planner delete <id>")?;
    let id: i64 = id.parse().map_err(|_| format!("Invalid task id {id:?}"))?;

    let store = open_store()?;
    store.delete_task(id).await.map_err(|e| e.to_string())?;
    println!("Task {id} deleted.");
    Ok(())
}

async fn cmd_stats() -> Result<(), String> {
    let store = open_store()?;
    let tasks = store.list_tasks().await.map_err(|e| e.to_string())?;

    println!("Tasks per platform:");
    let by_platform = calendar::platform_stats(&tasks);
    if by_platform.is_empty() {
        println!("  (none)");
    }
    for stat in by_platform {
        println!("  {:<12} {}", stat.name, stat.count);
    }

    println!("Tasks by status:");
    for stat in calendar::status_stats(&tasks) {
        println!("  {:<12} {}", stat.status.to_string(), stat.count);
    }
    Ok(())
}
