//! Start, resume and stop commands.
//!
//! Both start and resume walk the same chain of pickers
//! (workspace, project, task, description, billable, tags). Each answer is
//! written to state as soon as it is given, so resume after an interrupted
//! flow only prompts for what is still missing. Start clears the stored
//! fields first and therefore prompts for everything.
//!
//! Remote failures are shown on the surface and reported as "nothing
//! happened" (`Ok(None)` / `Ok(false)`); the tracking flag only changes after
//! the server accepted the request.

use crate::api::{Notifier, TimeEntryDto, TimeTracker};
use crate::db::state::keys;
use crate::libs::controller::Controller;
use crate::libs::messages::Message;
use crate::libs::pickers;
use crate::libs::prompts::{Prompter, Selection};
use crate::libs::providers::ViewKind;
use crate::libs::session::{self, StoredSession, TrackingSession};
use anyhow::Result;
use chrono::{DateTime, Utc};

impl<A: TimeTracker, P: Prompter, N: Notifier> Controller<A, P, N> {
    /// Prompts for every field and starts a new entry now.
    pub async fn start_tracking(&mut self) -> Result<Option<TimeEntryDto>> {
        session::clear_fields(&self.state)?;
        self.prompt_and_start().await
    }

    /// Starts a new entry, prompting only for fields missing from state.
    pub async fn resume_tracking(&mut self) -> Result<Option<TimeEntryDto>> {
        self.prompt_and_start().await
    }

    async fn prompt_and_start(&mut self) -> Result<Option<TimeEntryDto>> {
        match self.complete_session().await {
            Ok(Some(session)) => self.start_with(session).await,
            Ok(None) => {
                tracing::info!("{}", Message::TrackingAborted("Tracking".to_string()));
                Ok(None)
            }
            Err(e) => {
                self.surface.error(&Message::TrackingStartFailed(e.to_string()));
                Ok(None)
            }
        }
    }

    /// Fills the session from state and prompts. `None` when a prompt was cancelled.
    pub(crate) async fn complete_session(&self) -> Result<Option<TrackingSession>> {
        let stored = StoredSession::load(&self.state)?;

        let workspace_id = match stored.workspace_id {
            Some(id) => id,
            None => {
                let Selection::Selected(workspace) = pickers::select_workspace(&self.api, &self.prompter).await? else {
                    return Ok(None);
                };
                self.state.set(keys::WORKSPACE_ID, &workspace.id)?;
                workspace.id
            }
        };

        let mut billable_default = false;
        let project_id = match stored.project_id {
            Some(id) => id,
            None => {
                let Selection::Selected(project) = pickers::select_project(&self.api, &self.prompter, &workspace_id).await? else {
                    return Ok(None);
                };
                billable_default = project.as_ref().is_some_and(|p| p.billable);
                let id = project.map(|p| p.id);
                self.state.set(keys::PROJECT_ID, &id)?;
                id
            }
        };

        let task_id = match stored.task_id {
            Some(id) => id,
            None => {
                let Selection::Selected(task) = pickers::select_task(&self.api, &self.prompter, &workspace_id, project_id.as_deref()).await? else {
                    return Ok(None);
                };
                let id = task.map(|t| t.id);
                self.state.set(keys::TASK_ID, &id)?;
                id
            }
        };

        let description = match stored.description {
            Some(description) => description,
            None => {
                let Selection::Selected(description) = pickers::describe(&self.prompter, None).await? else {
                    return Ok(None);
                };
                self.state.set(keys::DESCRIPTION, &description)?;
                description
            }
        };

        let billable = match stored.billable {
            Some(billable) => billable,
            None => {
                let Selection::Selected(billable) = pickers::select_billable(&self.prompter, billable_default).await? else {
                    return Ok(None);
                };
                self.state.set(keys::BILLABLE, &billable)?;
                billable
            }
        };

        let tag_ids = match stored.tag_ids {
            Some(tag_ids) => tag_ids,
            None => {
                let Selection::Selected(tag_ids) = pickers::select_tags(&self.api, &self.prompter, &workspace_id).await? else {
                    return Ok(None);
                };
                self.state.set(keys::TAG_IDS, &tag_ids)?;
                tag_ids
            }
        };

        Ok(Some(TrackingSession {
            is_tracking: stored.is_tracking,
            workspace_id,
            project_id,
            task_id,
            description,
            billable,
            tag_ids,
        }))
    }

    /// Creates a running entry from `session` and marks the session as tracking.
    pub async fn start_with(&mut self, session: TrackingSession) -> Result<Option<TimeEntryDto>> {
        let request = session.time_entry(Utc::now());
        let created = match self.api.add_time_entry(&session.workspace_id, &request).await {
            Ok(created) => created,
            Err(e) => {
                self.surface.error(&Message::TrackingStartFailed(e.to_string()));
                return Ok(None);
            }
        };

        self.state.set(keys::LAST_WORKSPACE_ID, &session.workspace_id)?;
        TrackingSession {
            is_tracking: true,
            ..session
        }
        .persist(&self.state)?;

        tracing::info!(entry = %created.id, "time entry started");
        self.surface.info(&Message::TrackingStarted);
        self.tracking_changed().await?;
        Ok(Some(created))
    }

    pub async fn stop_tracking(&mut self) -> Result<bool> {
        self.stop_tracking_at(Utc::now()).await
    }

    /// Stops the running entry at `end`. Returns whether the server stopped it.
    ///
    /// Session fields stay in state so a later resume can reuse them.
    pub async fn stop_tracking_at(&mut self, end: DateTime<Utc>) -> Result<bool> {
        let stored = StoredSession::load(&self.state)?;
        if !stored.is_tracking {
            self.surface.info(&Message::TrackingNotActive);
            return Ok(false);
        }
        let Some(workspace_id) = stored.workspace_id else {
            // A flag without a workspace cannot be stopped remotely.
            session::set_tracking(&self.state, false)?;
            self.surface.info(&Message::TrackingNotActive);
            return Ok(false);
        };

        if let Err(e) = self.api.stop_time_entry(&workspace_id, end).await {
            self.surface.error(&Message::TrackingStopFailed(e.to_string()));
            return Ok(false);
        }

        session::set_tracking(&self.state, false)?;
        self.surface.info(&Message::TrackingStopped);
        self.tracking_changed().await?;
        Ok(true)
    }

    /// Drops every stored session field.
    pub fn forget(&mut self) -> Result<()> {
        session::clear(&self.state)?;
        self.surface.info(&Message::TrackingCleared);
        self.providers.refresh(ViewKind::TimeEntries, None);
        Ok(())
    }

    async fn tracking_changed(&mut self) -> Result<()> {
        self.update_status(true).await?;
        self.providers.refresh(ViewKind::TimeEntries, None);
        Ok(())
    }
}
