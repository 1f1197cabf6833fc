//! List views the editor shows (workspaces, projects, ...) and their refresh hook.
//!
//! The controller never reads a view; after changing state it only asks the
//! affected views to `refresh`. Which views depend on which selection:
//!
//! ```text
//! workspace ──▶ clients, projects, tasks, tags, time entries
//! project   ──▶ projects, tasks, time entries
//! tracking  ──▶ time entries
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Workspaces,
    Clients,
    Projects,
    Tasks,
    Tags,
    TimeEntries,
}

impl ViewKind {
    pub const ALL: [ViewKind; 6] = [
        ViewKind::Workspaces,
        ViewKind::Clients,
        ViewKind::Projects,
        ViewKind::Tasks,
        ViewKind::Tags,
        ViewKind::TimeEntries,
    ];

    pub const WORKSPACE_DEPENDENTS: [ViewKind; 5] =
        [ViewKind::Clients, ViewKind::Projects, ViewKind::Tasks, ViewKind::Tags, ViewKind::TimeEntries];

    pub const PROJECT_DEPENDENTS: [ViewKind; 3] = [ViewKind::Projects, ViewKind::Tasks, ViewKind::TimeEntries];
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ViewKind::Workspaces => "workspaces",
            ViewKind::Clients => "clients",
            ViewKind::Projects => "projects",
            ViewKind::Tasks => "tasks",
            ViewKind::Tags => "tags",
            ViewKind::TimeEntries => "time entries",
        };
        write!(f, "{}", name)
    }
}

pub trait TreeProvider {
    /// Reloads the view, or only `element` within it when given.
    fn refresh(&self, element: Option<&str>);
}

/// Terminal mode has no live views; refreshes are only logged.
#[derive(Debug, Clone, Copy)]
pub struct LoggingProvider {
    view: ViewKind,
}

impl LoggingProvider {
    pub fn new(view: ViewKind) -> Self {
        Self { view }
    }
}

impl TreeProvider for LoggingProvider {
    fn refresh(&self, element: Option<&str>) {
        tracing::debug!(view = %self.view, element, "refresh");
    }
}

/// Registry of views by kind.
#[derive(Default)]
pub struct ProviderStore {
    providers: HashMap<ViewKind, Box<dyn TreeProvider>>,
}

impl ProviderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every view backed by a [`LoggingProvider`].
    pub fn logging() -> Self {
        let mut store = Self::new();
        for view in ViewKind::ALL {
            store.register(view, Box::new(LoggingProvider::new(view)));
        }
        store
    }

    pub fn register(&mut self, view: ViewKind, provider: Box<dyn TreeProvider>) {
        self.providers.insert(view, provider);
    }

    /// Unregistered views are skipped.
    pub fn refresh(&self, view: ViewKind, element: Option<&str>) {
        if let Some(provider) = self.providers.get(&view) {
            provider.refresh(element);
        }
    }

    pub fn refresh_all(&self, views: &[ViewKind]) {
        for view in views {
            self.refresh(*view, None);
        }
    }
}
