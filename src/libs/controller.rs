//! The controller owns everything a running session needs and reacts to
//! focus changes, status refresh requests and user commands.
//!
//! State that used to be module-level globals lives in [`UiState`]: the idle
//! detector with its pending notification, the cached daily average and the
//! last status shown. Events are handled one at a time, so no locking is
//! involved.
//!
//! Tracking commands live in [`super::tracking`] and selection handling in
//! [`super::selection`]; both are further `impl` blocks on [`Controller`].

use crate::api::{Notifier, TimeTracker};
use crate::db::state::{keys, State};
use crate::libs::config::IdleConfig;
use crate::libs::idle::{FocusOutcome, IdleChoice, IdleDetector, IdleEvent};
use crate::libs::messages::Message;
use crate::libs::prompts::Prompter;
use crate::libs::providers::ProviderStore;
use crate::libs::session::StoredSession;
use crate::libs::summary::{fetch_average, fetch_today, DailySummary, StatusDisplay};
use crate::libs::surface::Surface;
use anyhow::Result;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};

/// Per-process UI bookkeeping.
pub struct UiState<N: Notifier> {
    pub idle: IdleDetector<N>,
    /// Daily average from the last successful fetch.
    pub last_average: Option<Duration>,
    pub average_loaded: bool,
    pub status: Option<StatusDisplay>,
}

impl<N: Notifier> UiState<N> {
    pub fn new(notifier: N, idle: &IdleConfig) -> Self {
        Self {
            idle: IdleDetector::new(notifier, idle),
            last_average: None,
            average_loaded: false,
            status: None,
        }
    }
}

pub struct Controller<A: TimeTracker, P: Prompter, N: Notifier> {
    pub(crate) api: A,
    pub(crate) prompter: P,
    pub(crate) state: State,
    pub(crate) surface: Box<dyn Surface>,
    pub(crate) providers: ProviderStore,
    pub(crate) ui: UiState<N>,
}

impl<A: TimeTracker, P: Prompter, N: Notifier> Controller<A, P, N> {
    pub fn new(api: A, prompter: P, notifier: N, state: State, surface: Box<dyn Surface>, providers: ProviderStore, idle: &IdleConfig) -> Self {
        Self {
            api,
            prompter,
            state,
            surface,
            providers,
            ui: UiState::new(notifier, idle),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn ui(&self) -> &UiState<N> {
        &self.ui
    }

    /// Workspace the status summary is computed for.
    ///
    /// Tries the tracking session, the workspace selected in the views, the
    /// workspace of the last started entry and finally the user's active
    /// workspace on the server.
    pub async fn summary_workspace(&self) -> Result<Option<String>> {
        if let Some(id) = self.state.get::<String>(keys::WORKSPACE_ID)?.filter(|id| !id.is_empty()) {
            return Ok(Some(id));
        }
        if let Some(workspace) = self.selected_workspace()? {
            return Ok(Some(workspace.id));
        }
        if let Some(id) = self.state.get::<String>(keys::LAST_WORKSPACE_ID)?.filter(|id| !id.is_empty()) {
            return Ok(Some(id));
        }

        match self.api.current_user().await {
            Ok(user) => Ok(user.active_workspace.or(user.default_workspace)),
            Err(e) => {
                self.surface.error(&Message::ApiRequestFailed(e.to_string()));
                Ok(None)
            }
        }
    }

    pub async fn update_status(&mut self, refresh_average: bool) -> Result<StatusDisplay> {
        self.update_status_at(refresh_average, &Local::now()).await
    }

    /// Recomputes the status as of `now` and pushes it to the surface.
    ///
    /// The average is fetched only on request or when it was never loaded;
    /// otherwise the cached value is reused. Fetch failures are shown on the
    /// surface and leave the corresponding value without data.
    pub async fn update_status_at<Tz: TimeZone>(&mut self, refresh_average: bool, now: &DateTime<Tz>) -> Result<StatusDisplay> {
        let tracking = self.state.is_tracking()?;
        let workspace_id = self.summary_workspace().await?;

        let mut today = None;
        if let Some(workspace_id) = workspace_id.as_deref() {
            if refresh_average || !self.ui.average_loaded {
                match fetch_average(&self.api, workspace_id, now).await {
                    Ok(average) => {
                        self.ui.last_average = average;
                        self.ui.average_loaded = true;
                    }
                    Err(e) => self.surface.error(&Message::StatusAverageFailed(e.to_string())),
                }
            }

            match fetch_today(&self.api, workspace_id, now).await {
                Ok(total) => today = Some(total),
                Err(e) => self.surface.error(&Message::StatusTodayFailed(e.to_string())),
            }
        }

        let display = DailySummary::new(today, self.ui.last_average).display(tracking);
        self.surface.show_status(&display);
        self.ui.status = Some(display.clone());
        Ok(display)
    }

    /// Feeds one focus transition to the idle detector.
    ///
    /// Returns the user's choice when the transition ended an idle interval
    /// that a session was tracking from start to end. A session started
    /// while the editor was unfocused does not count.
    pub async fn on_focus_change(&mut self, focused: bool, now: DateTime<Utc>) -> Result<Option<IdleChoice>> {
        let tracking = self.state.is_tracking()?;
        match self.ui.idle.on_focus_change(focused, tracking, now) {
            FocusOutcome::Idle(event) if event.tracked_throughout => Ok(Some(self.reconcile(event).await?)),
            FocusOutcome::Idle(event) => {
                tracing::debug!(idle = %event.describe(), "idle interval not fully tracked");
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Asks what to do with an idle interval and applies the answer.
    pub async fn reconcile(&mut self, event: IdleEvent) -> Result<IdleChoice> {
        let idle = event.describe();
        let answer = self.prompter.select(&Message::IdlePrompt(idle.clone()).to_string(), &IdleChoice::labels()).await?;
        let choice = IdleChoice::from_index(answer.selected());

        match choice {
            IdleChoice::Keep => {
                tracing::info!("{}", Message::IdleKept);
            }
            IdleChoice::Discard => {
                if self.stop_tracking_at(event.idle_start).await? {
                    self.surface.info(&Message::IdleDiscarded(idle));
                }
            }
            IdleChoice::DiscardAndResume => {
                // Captured before the stop so the new entry gets the same fields.
                let session = StoredSession::load(&self.state)?.complete();
                if !self.stop_tracking_at(event.idle_start).await? {
                    return Ok(choice);
                }
                self.surface.info(&Message::IdleDiscarded(idle));

                match session {
                    Some(session) => {
                        self.start_with(session).await?;
                    }
                    None => {
                        self.resume_tracking().await?;
                    }
                }
            }
        }

        Ok(choice)
    }

    /// Aborts the pending idle notification, if any.
    pub fn shutdown(&mut self) {
        if self.ui.idle.cancel() {
            tracing::debug!("pending idle notification cancelled");
        }
    }
}
