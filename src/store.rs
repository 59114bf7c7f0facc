//! Typed client for the hosted task store (Supabase PostgREST + RPC).
//!
//! Remote rows are deserialized into raw serde structs and mapped to the
//! internal types at this boundary — nothing duck-typed leaks past it.
//! Reads go through PostgREST table endpoints; task creation goes through
//! the `create_task_with_platforms` RPC so the task row and its platform
//! links land together.
//!
//! No timeout policy of its own: timeouts are delegated to the transport.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::submit::TaskWriter;
use crate::types::{ContentTask, Platform, PlatformDirectory, ResolvedTask, TaskStatus};

/// Connection settings for the task store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://xyzcompany.supabase.co`.
    pub url: String,
    /// Anon key, sent as both `apikey` and bearer token.
    pub anon_key: String,
}

/// Errors from task-store operations. Every variant renders as a
/// user-facing message; the submission orchestrator forwards them verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Store request failed ({status}): {message}")]
    Request { status: u16, message: String },
    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Network(err.to_string())
        }
    }
}

/// Pull a human-readable message out of a PostgREST error body.
///
/// Bodies look like `{"message": "...", "code": "..."}`; anything else
/// falls back to the raw text.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct RawErrorBody {
        message: Option<String>,
    }
    if let Ok(parsed) = serde_json::from_str::<RawErrorBody>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Raw remote shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlatformRow {
    id: i64,
    name: String,
}

impl From<RawPlatformRow> for Platform {
    fn from(raw: RawPlatformRow) -> Self {
        Platform { id: raw.id, name: raw.name }
    }
}

#[derive(Debug, Deserialize)]
struct RawTaskRow {
    id: i64,
    title: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    status: Option<String>,
    scheduled_date: String,
    #[serde(default)]
    media_url: Option<String>,
    #[serde(default)]
    platforms: Vec<RawPlatformRow>,
}

impl From<RawTaskRow> for ContentTask {
    fn from(raw: RawTaskRow) -> Self {
        let status = match raw.status.as_deref() {
            Some(s) => TaskStatus::parse(s).unwrap_or_else(|| {
                log::warn!("task {}: unknown status {s:?}, treating as Pending", raw.id);
                TaskStatus::Pending
            }),
            None => TaskStatus::Pending,
        };
        ContentTask {
            id: raw.id,
            title: raw.title,
            notes: raw.notes,
            status,
            scheduled_date: raw.scheduled_date,
            media_url: raw.media_url,
            platforms: raw.platforms.into_iter().map(Platform::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

const TASK_SELECT: &str = "*,platforms(id,name)";

/// Task-store client. Cheap to clone is not needed — one instance is built
/// per command invocation and injected where remote access is required.
pub struct ContentStore {
    http: Client,
    base: String,
    anon_key: String,
}

impl ContentStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        // Validate up front so a typo'd URL fails with a clear message
        // instead of a confusing network error later.
        Url::parse(&config.url).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http: Client::new(),
            base: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/rest/v1/{}", self.base, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Request {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    /// Fetch the platform directory (`{id, name}` pairs).
    ///
    /// Call this fresh before each bulk-parsing session — stale entries
    /// cause valid platform names to be misreported as unknown.
    pub async fn fetch_platforms(&self) -> Result<Vec<Platform>, StoreError> {
        let response = self
            .request(Method::GET, "platforms")
            .query(&[("select", "id,name")])
            .send()
            .await?;
        let rows: Vec<RawPlatformRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().map(Platform::from).collect())
    }

    /// Fetch platforms and build the lowercased name → id directory.
    pub async fn platform_directory(&self) -> Result<PlatformDirectory, StoreError> {
        Ok(PlatformDirectory::new(self.fetch_platforms().await?))
    }

    /// All tasks with their platforms, newest scheduled date first.
    pub async fn list_tasks(&self) -> Result<Vec<ContentTask>, StoreError> {
        let response = self
            .request(Method::GET, "content_tasks")
            .query(&[("select", TASK_SELECT), ("order", "scheduled_date.desc")])
            .send()
            .await?;
        let rows: Vec<RawTaskRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().map(ContentTask::from).collect())
    }

    /// Tasks scheduled on one local day, in creation order.
    pub async fn tasks_for_day(&self, day_key: &str) -> Result<Vec<ContentTask>, StoreError> {
        let date_filter = format!("eq.{day_key}");
        let response = self
            .request(Method::GET, "content_tasks")
            .query(&[
                ("select", TASK_SELECT),
                ("scheduled_date", date_filter.as_str()),
                ("order", "created_at.asc"),
            ])
            .send()
            .await?;
        let rows: Vec<RawTaskRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().map(ContentTask::from).collect())
    }

    /// Create one task together with its platform links, via RPC.
    pub async fn create_task(&self, task: &ResolvedTask) -> Result<(), StoreError> {
        let body = serde_json::json!({
            "title": task.title,
            "notes": task.notes,
            "scheduled_date": task.scheduled_date,
            "platform_ids": task.platform_ids,
            "media_url": task.media_url,
        });
        let response = self
            .request(Method::POST, "rpc/create_task_with_platforms")
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Update one task's lifecycle status.
    pub async fn update_status(&self, id: i64, status: TaskStatus) -> Result<(), StoreError> {
        let response = self
            .request(Method::PATCH, "content_tasks")
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({ "status": status.as_str() }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete one task.
    pub async fn delete_task(&self, id: i64) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, "content_tasks")
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskWriter for ContentStore {
    async fn create_task(&self, task: &ResolvedTask) -> Result<(), StoreError> {
        ContentStore::create_task(self, task).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_row_maps_to_typed_task() {
        let json = r#"{
            "id": 42,
            "title": "Launch Video",
            "notes": "end screen",
            "status": "Scheduled",
            "scheduled_date": "2025-07-15",
            "media_url": null,
            "platforms": [{"id": 1, "name": "YouTube"}]
        }"#;
        let raw: RawTaskRow = serde_json::from_str(json).unwrap();
        let task = ContentTask::from(raw);
        assert_eq!(task.id, 42);
        assert_eq!(task.status, TaskStatus::Scheduled);
        assert_eq!(task.platforms, vec![Platform { id: 1, name: "YouTube".to_string() }]);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"id": 1, "title": "t", "scheduled_date": "2025-07-15"}"#;
        let raw: RawTaskRow = serde_json::from_str(json).unwrap();
        let task = ContentTask::from(raw);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.notes.is_none());
        assert!(task.platforms.is_empty());
    }

    #[test]
    fn unknown_status_falls_back_to_pending() {
        let json = r#"{"id": 1, "title": "t", "status": "archived", "scheduled_date": "2025-07-15"}"#;
        let raw: RawTaskRow = serde_json::from_str(json).unwrap();
        assert_eq!(ContentTask::from(raw).status, TaskStatus::Pending);
    }

    #[test]
    fn error_message_prefers_body_message_field() {
        assert_eq!(
            error_message(r#"{"message": "duplicate key", "code": "23505"}"#),
            "duplicate key"
        );
        assert_eq!(error_message("plain text failure"), "plain text failure");
        assert_eq!(error_message("   "), "unknown error");
    }

    #[test]
    fn new_rejects_invalid_url_and_trims_trailing_slash() {
        let bad = StoreConfig { url: "not a url".to_string(), anon_key: "k".to_string() };
        assert!(matches!(ContentStore::new(&bad), Err(StoreError::InvalidUrl(_))));

        let good = StoreConfig {
            url: "https://example.supabase.co/".to_string(),
            anon_key: "k".to_string(),
        };
        let store = ContentStore::new(&good).unwrap();
        assert_eq!(store.base, "https://example.supabase.co");
    }
}
