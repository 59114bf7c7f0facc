//! Sequential task submission and the bulk-scheduling session.
//!
//! Submission is strictly one create at a time, in input order. That
//! ordering is load-bearing: the first failure stops the batch at a
//! deterministic boundary, everything before it has already been created
//! remotely and stands (there is no rollback), and the failure detail
//! carries both the offending task's title and the count of prior
//! successes so partial success is communicated rather than hidden.

use async_trait::async_trait;
use thiserror::Error;

use crate::parser;
use crate::store::StoreError;
use crate::types::{PlatformDirectory, ResolvedTask};

/// The remote create operation, injected so the orchestration is testable
/// with a substitute writer. [`crate::store::ContentStore`] is the real one.
#[async_trait]
pub trait TaskWriter: Send + Sync {
    async fn create_task(&self, task: &ResolvedTask) -> Result<(), StoreError>;
}

/// Detail of a mid-batch submission failure. Tasks submitted before the
/// failure are not rolled back; `submitted` counts them.
#[derive(Debug, Clone, Error)]
#[error("An error occurred while scheduling \"{title}\": {message}")]
pub struct SubmitFailure {
    pub title: String,
    pub message: String,
    pub submitted: usize,
}

/// Submit tasks one at a time, in input order, stopping at the first
/// failure. Returns the total count on full success.
///
/// A sequential fold over a result: each step either extends the
/// known-good prefix or terminates the batch with the failing task's
/// title and the remote message.
pub async fn submit_all(
    tasks: &[ResolvedTask],
    writer: &dyn TaskWriter,
) -> Result<usize, SubmitFailure> {
    let mut submitted = 0usize;
    for task in tasks {
        if let Err(err) = writer.create_task(task).await {
            log::warn!("submission stopped at \"{}\" after {submitted} task(s): {err}", task.title);
            return Err(SubmitFailure {
                title: task.title.clone(),
                message: err.to_string(),
                submitted,
            });
        }
        submitted += 1;
    }
    Ok(submitted)
}

/// Outcome of a successful bulk session: the number of tasks created,
/// plus any per-block parse problems encountered along the way.
#[derive(Debug, Clone)]
pub struct BulkReport {
    pub scheduled: usize,
    pub problems: Vec<String>,
}

/// Failure of a bulk session. Both variants carry the parse problems;
/// `Submission` also carries the known-good prefix count inside the
/// failure detail.
#[derive(Debug, Error)]
pub enum BulkError {
    #[error("No valid tasks could be parsed from the text.")]
    NoValidTasks { problems: Vec<String> },
    #[error("{failure}")]
    Submission { failure: SubmitFailure, problems: Vec<String> },
}

/// One bulk-scheduling session: parse the raw text against a freshly
/// fetched platform directory, then submit every valid draft.
///
/// Zero valid drafts is a single top-level error and nothing is
/// submitted. Per-block problems are non-fatal and reported alongside
/// the success count.
pub async fn run_bulk_schedule(
    raw: &str,
    platforms: &PlatformDirectory,
    writer: &dyn TaskWriter,
) -> Result<BulkReport, BulkError> {
    let outcome = parser::parse_bulk(raw, platforms);
    if outcome.tasks.is_empty() {
        return Err(BulkError::NoValidTasks { problems: outcome.problems });
    }
    match submit_all(&outcome.tasks, writer).await {
        Ok(scheduled) => Ok(BulkReport { scheduled, problems: outcome.problems }),
        Err(failure) => Err(BulkError::Submission { failure, problems: outcome.problems }),
    }
}
