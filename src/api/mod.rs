//! Remote services used by clockin.
//!
//! - **Clockify** ([`clockify`]): the time-tracking REST API. Consumed through
//!   the [`TimeTracker`] trait so the controller can be driven by a mock.
//! - **Telegram** ([`telegram`]): the best-effort idle notifier, consumed
//!   through the [`Notifier`] trait.
//!
//! Request and response DTOs follow Clockify's camelCase JSON.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

pub mod clockify;
pub mod telegram;

pub use clockify::{Clockify, ClockifyConfig};
pub use telegram::{Telegram, TelegramConfig};

/// Failures reported by the remote services.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{service} API key is not set, run `clockin init` first")]
    MissingApiKey { service: &'static str },

    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: &'static str,
        path: String,
        status: StatusCode,
        body: String,
    },
}

/// Clockify expects second-precision UTC timestamps (`2024-05-01T09:30:00Z`).
pub(crate) mod clockify_time {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn serialize_opt<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub active_workspace: Option<String>,
    #[serde(default)]
    pub default_workspace: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkspaceDto {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub workspace_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub billable: bool,
    #[serde(default)]
    pub public: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub color: String,
    pub is_public: bool,
    pub billable: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TagDto {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryRequest {
    #[serde(with = "clockify_time")]
    pub start: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "clockify_time::serialize_opt")]
    pub end: Option<DateTime<Utc>>,
    pub billable: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub tag_ids: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StopTimeEntryRequest {
    #[serde(with = "clockify_time")]
    pub end: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeIntervalDto {
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryDto {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub tag_ids: Option<Vec<String>>,
    #[serde(default)]
    pub billable: bool,
    #[serde(default)]
    pub workspace_id: Option<String>,
    pub time_interval: TimeIntervalDto,
}

/// Time-tracking service operations the controller depends on.
#[allow(async_fn_in_trait)]
pub trait TimeTracker {
    async fn current_user(&self) -> anyhow::Result<UserDto>;

    async fn workspaces(&self) -> anyhow::Result<Vec<WorkspaceDto>>;

    async fn clients(&self, workspace_id: &str) -> anyhow::Result<Vec<ClientDto>>;

    async fn projects(&self, workspace_id: &str) -> anyhow::Result<Vec<ProjectDto>>;

    async fn add_project(&self, workspace_id: &str, project: &ProjectRequest) -> anyhow::Result<ProjectDto>;

    async fn tasks(&self, workspace_id: &str, project_id: &str) -> anyhow::Result<Vec<TaskDto>>;

    async fn tags(&self, workspace_id: &str) -> anyhow::Result<Vec<TagDto>>;

    /// Starts a new time entry. A request without `end` leaves it running.
    async fn add_time_entry(&self, workspace_id: &str, entry: &TimeEntryRequest) -> anyhow::Result<TimeEntryDto>;

    /// Stops the current user's running entry at `end`.
    async fn stop_time_entry(&self, workspace_id: &str, end: DateTime<Utc>) -> anyhow::Result<TimeEntryDto>;

    /// Entries of the current user that started within `[start, end)`.
    async fn time_entries(&self, workspace_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> anyhow::Result<Vec<TimeEntryDto>>;
}

/// Fire-and-forget channel used when the user looks idle while tracking.
///
/// The returned future is `Send` so it can run on a spawned timer task.
pub trait Notifier: Clone + Send + Sync + 'static {
    fn notify_idle(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}
