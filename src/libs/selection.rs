//! Workspace and project selection in the list views.
//!
//! Selecting changes persisted state and then refreshes the views that
//! depend on it (see [`ViewKind::WORKSPACE_DEPENDENTS`] and
//! [`ViewKind::PROJECT_DEPENDENTS`]). Selecting what is already selected is a
//! no-op.

use crate::api::{Notifier, ProjectDto, ProjectRequest, TimeTracker, WorkspaceDto};
use crate::db::state::keys;
use crate::libs::controller::Controller;
use crate::libs::messages::Message;
use crate::libs::pickers;
use crate::libs::prompts::{Prompter, Selection};
use crate::libs::providers::ViewKind;
use crate::msg_bail_anyhow;
use anyhow::Result;

impl<A: TimeTracker, P: Prompter, N: Notifier> Controller<A, P, N> {
    pub fn selected_workspace(&self) -> Result<Option<WorkspaceDto>> {
        Ok(self.state.get::<Option<WorkspaceDto>>(keys::SELECTED_WORKSPACE)?.flatten())
    }

    pub fn selected_project(&self) -> Result<Option<ProjectDto>> {
        Ok(self.state.get::<Option<ProjectDto>>(keys::SELECTED_PROJECT)?.flatten())
    }

    /// Returns `false` when `workspace` was already selected.
    pub fn select_workspace(&mut self, workspace: WorkspaceDto) -> Result<bool> {
        if self.selected_workspace()?.is_some_and(|current| current.id == workspace.id) {
            return Ok(false);
        }

        self.state.remove(keys::SELECTED_PROJECT)?;
        self.state.set(keys::SELECTED_WORKSPACE, &workspace)?;
        self.providers.refresh_all(&ViewKind::WORKSPACE_DEPENDENTS);
        self.surface.info(&Message::WorkspaceSelected(workspace.name));
        Ok(true)
    }

    pub async fn pick_workspace(&mut self) -> Result<bool> {
        let Selection::Selected(workspace) = pickers::select_workspace(&self.api, &self.prompter).await? else {
            tracing::info!("{}", Message::OperationCancelled);
            return Ok(false);
        };
        self.select_workspace(workspace)
    }

    /// Returns `false` when `project` was already selected.
    pub fn select_project(&mut self, project: ProjectDto) -> Result<bool> {
        if self.selected_project()?.is_some_and(|current| current.id == project.id) {
            return Ok(false);
        }

        self.state.set(keys::SELECTED_PROJECT, &project)?;
        self.providers.refresh_all(&ViewKind::PROJECT_DEPENDENTS);
        self.surface.info(&Message::ProjectSelected(project.name));
        Ok(true)
    }

    /// Picking "no project" clears the selection.
    pub async fn pick_project(&mut self) -> Result<bool> {
        let Some(workspace) = self.selected_workspace()? else {
            msg_bail_anyhow!(Message::NoWorkspaceSelected);
        };
        match pickers::select_project(&self.api, &self.prompter, &workspace.id).await? {
            Selection::Selected(Some(project)) => self.select_project(project),
            Selection::Selected(None) => {
                self.refresh_projects(None)?;
                Ok(true)
            }
            Selection::Cancelled => {
                tracing::info!("{}", Message::OperationCancelled);
                Ok(false)
            }
        }
    }

    /// Clears the project selection and reloads the project views.
    pub fn refresh_projects(&mut self, element: Option<&str>) -> Result<()> {
        self.state.remove(keys::SELECTED_PROJECT)?;
        self.providers.refresh(ViewKind::Projects, element);
        self.providers.refresh(ViewKind::Tasks, None);
        self.providers.refresh(ViewKind::TimeEntries, None);
        Ok(())
    }

    /// Creates a project in the selected workspace.
    pub async fn add_project(&mut self) -> Result<Option<ProjectDto>> {
        let Some(workspace) = self.selected_workspace()? else {
            msg_bail_anyhow!(Message::NoWorkspaceSelected);
        };

        let Selection::Selected(name) = pickers::project_name(&self.prompter).await? else {
            return Ok(self.cancelled());
        };
        let Selection::Selected(client_id) = pickers::select_client(&self.api, &self.prompter, &workspace.id).await? else {
            return Ok(self.cancelled());
        };
        let Selection::Selected(color) = pickers::select_color(&self.prompter).await? else {
            return Ok(self.cancelled());
        };
        let Selection::Selected(is_public) = pickers::select_visibility(&self.prompter).await? else {
            return Ok(self.cancelled());
        };
        let Selection::Selected(billable) = pickers::select_billable(&self.prompter, false).await? else {
            return Ok(self.cancelled());
        };

        let request = ProjectRequest {
            name,
            client_id,
            color,
            is_public,
            billable,
        };
        let project = self.api.add_project(&workspace.id, &request).await?;

        self.providers.refresh(ViewKind::Projects, None);
        self.surface.info(&Message::ProjectAdded(project.name.clone()));
        Ok(Some(project))
    }

    fn cancelled<T>(&self) -> Option<T> {
        tracing::info!("{}", Message::OperationCancelled);
        None
    }
}
