#![allow(dead_code)]

//! In-memory doubles shared by the integration tests.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clockin::api::{
    ClientDto, Notifier, ProjectDto, ProjectRequest, TagDto, TaskDto, TimeEntryDto, TimeEntryRequest, TimeIntervalDto, TimeTracker, UserDto,
    WorkspaceDto,
};
use clockin::db::state::State;
use clockin::libs::config::IdleConfig;
use clockin::libs::controller::Controller;
use clockin::libs::messages::Message;
use clockin::libs::prompts::{Prompter, Selection};
use clockin::libs::providers::{ProviderStore, TreeProvider, ViewKind};
use clockin::libs::summary::StatusDisplay;
use clockin::libs::surface::Surface;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, hour, minute, 0).unwrap()
}

pub fn workspace(id: &str, name: &str) -> WorkspaceDto {
    WorkspaceDto {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn project(id: &str, name: &str, billable: bool) -> ProjectDto {
    ProjectDto {
        id: id.to_string(),
        name: name.to_string(),
        client_id: None,
        color: None,
        billable,
        public: false,
    }
}

pub fn task(id: &str, name: &str) -> TaskDto {
    TaskDto {
        id: id.to_string(),
        name: name.to_string(),
        project_id: None,
        status: None,
    }
}

pub fn tag(id: &str, name: &str) -> TagDto {
    TagDto {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn entry(id: &str, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> TimeEntryDto {
    TimeEntryDto {
        id: id.to_string(),
        description: None,
        project_id: None,
        task_id: None,
        tag_ids: None,
        billable: false,
        workspace_id: None,
        time_interval: TimeIntervalDto { start, end, duration: None },
    }
}

pub fn entry_for(id: &str, start: DateTime<Utc>, length: Duration) -> TimeEntryDto {
    entry(id, start, Some(start + length))
}

/// Write calls made against [`MockTracker`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AddTimeEntry { workspace_id: String, entry: TimeEntryRequest },
    StopTimeEntry { workspace_id: String, end: DateTime<Utc> },
    AddProject { workspace_id: String, project: ProjectRequest },
}

#[derive(Default)]
pub struct MockTracker {
    pub user: Option<UserDto>,
    pub workspaces: Vec<WorkspaceDto>,
    pub clients: Vec<ClientDto>,
    pub projects: Vec<ProjectDto>,
    pub tasks: Vec<TaskDto>,
    pub tags: Vec<TagDto>,
    pub entries: Vec<TimeEntryDto>,
    pub fail_start: bool,
    pub fail_stop: bool,
    pub fail_entries: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl MockTracker {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn starts(&self) -> Vec<TimeEntryRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddTimeEntry { entry, .. } => Some(entry),
                _ => None,
            })
            .collect()
    }

    pub fn stops(&self) -> Vec<DateTime<Utc>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::StopTimeEntry { end, .. } => Some(end),
                _ => None,
            })
            .collect()
    }
}

impl TimeTracker for MockTracker {
    async fn current_user(&self) -> Result<UserDto> {
        self.user.clone().ok_or_else(|| anyhow!("user lookup failed"))
    }

    async fn workspaces(&self) -> Result<Vec<WorkspaceDto>> {
        Ok(self.workspaces.clone())
    }

    async fn clients(&self, _workspace_id: &str) -> Result<Vec<ClientDto>> {
        Ok(self.clients.clone())
    }

    async fn projects(&self, _workspace_id: &str) -> Result<Vec<ProjectDto>> {
        Ok(self.projects.clone())
    }

    async fn add_project(&self, workspace_id: &str, project: &ProjectRequest) -> Result<ProjectDto> {
        self.calls.lock().push(Call::AddProject {
            workspace_id: workspace_id.to_string(),
            project: project.clone(),
        });
        Ok(ProjectDto {
            id: "p-new".to_string(),
            name: project.name.clone(),
            client_id: project.client_id.clone(),
            color: Some(project.color.clone()),
            billable: project.billable,
            public: project.is_public,
        })
    }

    async fn tasks(&self, _workspace_id: &str, _project_id: &str) -> Result<Vec<TaskDto>> {
        Ok(self.tasks.clone())
    }

    async fn tags(&self, _workspace_id: &str) -> Result<Vec<TagDto>> {
        Ok(self.tags.clone())
    }

    async fn add_time_entry(&self, workspace_id: &str, entry: &TimeEntryRequest) -> Result<TimeEntryDto> {
        if self.fail_start {
            return Err(anyhow!("start rejected"));
        }
        self.calls.lock().push(Call::AddTimeEntry {
            workspace_id: workspace_id.to_string(),
            entry: entry.clone(),
        });
        Ok(self::entry("e-new", entry.start, None))
    }

    async fn stop_time_entry(&self, workspace_id: &str, end: DateTime<Utc>) -> Result<TimeEntryDto> {
        if self.fail_stop {
            return Err(anyhow!("stop rejected"));
        }
        self.calls.lock().push(Call::StopTimeEntry {
            workspace_id: workspace_id.to_string(),
            end,
        });
        Ok(self::entry("e-running", end - Duration::hours(1), Some(end)))
    }

    async fn time_entries(&self, _workspace_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeEntryDto>> {
        if self.fail_entries {
            return Err(anyhow!("entries unavailable"));
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| e.time_interval.start >= start && e.time_interval.start < end)
            .cloned()
            .collect())
    }
}

/// One scripted answer; `None` dismisses the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Select(Option<usize>),
    MultiSelect(Option<Vec<usize>>),
    Input(Option<String>),
    Confirm(Option<bool>),
}

/// Answers prompts from a script and records every prompt message.
#[derive(Default)]
pub struct MockPrompter {
    replies: Mutex<VecDeque<Reply>>,
    pub asked: Mutex<Vec<String>>,
}

impl MockPrompter {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }

    fn next(&self, message: &str) -> Result<Reply> {
        self.asked.lock().push(message.to_string());
        self.replies.lock().pop_front().ok_or_else(|| anyhow!("unexpected prompt: {}", message))
    }
}

impl Prompter for MockPrompter {
    async fn select(&self, message: &str, _items: &[String]) -> Result<Selection<usize>> {
        match self.next(message)? {
            Reply::Select(choice) => Ok(choice.into()),
            other => Err(anyhow!("expected a select reply for '{}', got {:?}", message, other)),
        }
    }

    async fn multi_select(&self, message: &str, _items: &[String]) -> Result<Selection<Vec<usize>>> {
        match self.next(message)? {
            Reply::MultiSelect(choice) => Ok(choice.into()),
            other => Err(anyhow!("expected a multi-select reply for '{}', got {:?}", message, other)),
        }
    }

    async fn input(&self, message: &str, _default: Option<&str>) -> Result<Selection<String>> {
        match self.next(message)? {
            Reply::Input(value) => Ok(value.into()),
            other => Err(anyhow!("expected an input reply for '{}', got {:?}", message, other)),
        }
    }

    async fn confirm(&self, message: &str, _default: bool) -> Result<Selection<bool>> {
        match self.next(message)? {
            Reply::Confirm(value) => Ok(value.into()),
            other => Err(anyhow!("expected a confirm reply for '{}', got {:?}", message, other)),
        }
    }
}

/// Counts idle notifications.
#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<AtomicUsize>,
}

impl MockNotifier {
    pub fn count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

impl Notifier for MockNotifier {
    async fn notify_idle(&self) -> Result<()> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Status(StatusDisplay),
    Info(String),
    Error(String),
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub shown: Arc<Mutex<Vec<Shown>>>,
}

impl Surface for RecordingSurface {
    fn show_status(&self, status: &StatusDisplay) {
        self.shown.lock().push(Shown::Status(status.clone()));
    }

    fn info(&self, message: &Message) {
        self.shown.lock().push(Shown::Info(message.to_string()));
    }

    fn error(&self, message: &Message) {
        self.shown.lock().push(Shown::Error(message.to_string()));
    }
}

pub type Refreshes = Arc<Mutex<Vec<(ViewKind, Option<String>)>>>;

pub struct RecordingProvider {
    view: ViewKind,
    log: Refreshes,
}

impl TreeProvider for RecordingProvider {
    fn refresh(&self, element: Option<&str>) {
        self.log.lock().push((self.view, element.map(str::to_string)));
    }
}

pub fn recording_providers() -> (ProviderStore, Refreshes) {
    let log: Refreshes = Arc::default();
    let mut store = ProviderStore::new();
    for view in ViewKind::ALL {
        store.register(
            view,
            Box::new(RecordingProvider {
                view,
                log: log.clone(),
            }),
        );
    }
    (store, log)
}

/// Handles on everything the controller reports outward.
pub struct Recorder {
    pub shown: Arc<Mutex<Vec<Shown>>>,
    pub refreshes: Refreshes,
    pub notifier: MockNotifier,
}

impl Recorder {
    pub fn infos(&self) -> Vec<String> {
        self.shown
            .lock()
            .iter()
            .filter_map(|s| match s {
                Shown::Info(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.shown
            .lock()
            .iter()
            .filter_map(|s| match s {
                Shown::Error(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<StatusDisplay> {
        self.shown
            .lock()
            .iter()
            .filter_map(|s| match s {
                Shown::Status(status) => Some(status.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn refreshed(&self) -> Vec<ViewKind> {
        self.refreshes.lock().iter().map(|(view, _)| *view).collect()
    }

    pub fn clear(&self) {
        self.shown.lock().clear();
        self.refreshes.lock().clear();
    }
}

pub type TestController = Controller<MockTracker, MockPrompter, MockNotifier>;

pub fn controller(api: MockTracker, prompter: MockPrompter) -> (TestController, Recorder) {
    controller_with_idle(api, prompter, IdleConfig::default())
}

pub fn controller_with_idle(api: MockTracker, prompter: MockPrompter, idle: IdleConfig) -> (TestController, Recorder) {
    let surface = RecordingSurface::default();
    let (providers, refreshes) = recording_providers();
    let notifier = MockNotifier::default();
    let recorder = Recorder {
        shown: surface.shown.clone(),
        refreshes,
        notifier: notifier.clone(),
    };

    let controller = Controller::new(
        api,
        prompter,
        notifier,
        State::in_memory().unwrap(),
        Box::new(surface),
        providers,
        &idle,
    );
    (controller, recorder)
}
