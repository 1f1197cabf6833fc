//! Clockify REST client.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clockin::api::{Clockify, TimeTracker};
//! use clockin::libs::config::Config;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = Clockify::from_config(&Config::read()?)?;
//! for workspace in client.workspaces().await? {
//!     println!("{}", workspace.name);
//! }
//! # Ok(())
//! # }
//! ```

use super::{
    ApiError, ClientDto, ProjectDto, ProjectRequest, StopTimeEntryRequest, TagDto, TaskDto, TimeEntryDto, TimeEntryRequest, TimeTracker,
    UserDto, WorkspaceDto,
};
use crate::libs::config::{Config, ConfigModule};
use crate::libs::messages::Message;
use crate::libs::secret::{Secret, CLOCKIFY_SECRET_FILE};
use crate::{msg_print, msg_success};
use anyhow::Result;
use chrono::{DateTime, Utc};
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

pub const DEFAULT_API_URL: &str = "https://api.clockify.me/api/v1";
const API_KEY_HEADER: &str = "X-Api-Key";
const PAGE_SIZE: usize = 500;

#[derive(Debug)]
pub struct Clockify {
    client: Client,
    config: ClockifyConfig,
    api_key: String,
    user_id: OnceCell<String>,
}

impl Clockify {
    pub fn new(config: &ClockifyConfig, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            api_key: api_key.to_owned(),
            user_id: OnceCell::new(),
        }
    }

    /// Builds a client from the stored configuration and encrypted API key.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = ClockifyConfig::secret().get().ok_or(ApiError::MissingApiKey { service: "Clockify" })?;
        Ok(Self::new(&config.clockify.clone().unwrap_or_default(), &api_key))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    async fn user_id(&self) -> Result<&str> {
        let id = self.user_id.get_or_try_init(|| async { self.current_user().await.map(|user| user.id) }).await?;
        Ok(id.as_str())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let res = self.client.get(self.url(path)).header(API_KEY_HEADER, &self.api_key).send().await?;
        Self::parse("GET", path, res).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let res = self.client.post(self.url(path)).header(API_KEY_HEADER, &self.api_key).json(body).send().await?;
        Self::parse("POST", path, res).await
    }

    async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let res = self.client.patch(self.url(path)).header(API_KEY_HEADER, &self.api_key).json(body).send().await?;
        Self::parse("PATCH", path, res).await
    }

    async fn parse<T: DeserializeOwned>(method: &'static str, path: &str, res: Response) -> Result<T> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                method,
                path: path.to_string(),
                status,
                body,
            }
            .into());
        }
        Ok(res.json::<T>().await?)
    }
}

impl TimeTracker for Clockify {
    async fn current_user(&self) -> Result<UserDto> {
        self.get("user").await
    }

    async fn workspaces(&self) -> Result<Vec<WorkspaceDto>> {
        self.get("workspaces").await
    }

    async fn clients(&self, workspace_id: &str) -> Result<Vec<ClientDto>> {
        self.get(&format!("workspaces/{}/clients", workspace_id)).await
    }

    async fn projects(&self, workspace_id: &str) -> Result<Vec<ProjectDto>> {
        self.get(&format!("workspaces/{}/projects", workspace_id)).await
    }

    async fn add_project(&self, workspace_id: &str, project: &ProjectRequest) -> Result<ProjectDto> {
        self.post(&format!("workspaces/{}/projects", workspace_id), project).await
    }

    async fn tasks(&self, workspace_id: &str, project_id: &str) -> Result<Vec<TaskDto>> {
        self.get(&format!("workspaces/{}/projects/{}/tasks", workspace_id, project_id)).await
    }

    async fn tags(&self, workspace_id: &str) -> Result<Vec<TagDto>> {
        self.get(&format!("workspaces/{}/tags", workspace_id)).await
    }

    async fn add_time_entry(&self, workspace_id: &str, entry: &TimeEntryRequest) -> Result<TimeEntryDto> {
        self.post(&format!("workspaces/{}/time-entries", workspace_id), entry).await
    }

    async fn stop_time_entry(&self, workspace_id: &str, end: DateTime<Utc>) -> Result<TimeEntryDto> {
        let user_id = self.user_id().await?;
        let path = format!("workspaces/{}/user/{}/time-entries", workspace_id, user_id);
        self.patch(&path, &StopTimeEntryRequest { end }).await
    }

    async fn time_entries(&self, workspace_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeEntryDto>> {
        let user_id = self.user_id().await?;
        let path = format!("workspaces/{}/user/{}/time-entries", workspace_id, user_id);
        let start = start.format(super::clockify_time::FORMAT).to_string();
        let end = end.format(super::clockify_time::FORMAT).to_string();
        let page_size = PAGE_SIZE.to_string();

        let mut entries = Vec::new();
        let mut page = 1usize;
        loop {
            let res = self
                .client
                .get(self.url(&path))
                .header(API_KEY_HEADER, &self.api_key)
                .query(&[
                    ("start", start.as_str()),
                    ("end", end.as_str()),
                    ("page-size", page_size.as_str()),
                    ("page", page.to_string().as_str()),
                ])
                .send()
                .await?;
            let batch: Vec<TimeEntryDto> = Self::parse("GET", &path, res).await?;
            let done = batch.len() < PAGE_SIZE;
            entries.extend(batch);
            if done {
                break;
            }
            page += 1;
        }
        tracing::debug!(count = entries.len(), pages = page, "fetched time entries");
        Ok(entries)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClockifyConfig {
    pub api_url: String,
}

impl Default for ClockifyConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClockifyConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "clockify".to_string(),
            name: "Clockify".to_string(),
        }
    }

    pub fn secret() -> Secret {
        Secret::new(CLOCKIFY_SECRET_FILE, &Message::PromptClockifyApiKey.to_string())
    }

    /// Prompts for the API URL and a fresh API key.
    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleClockify);
        let config = Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptClockifyUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
        };
        Self::secret().prompt()?;
        msg_success!(Message::ClockifyApiKeySaved);
        Ok(config)
    }
}
