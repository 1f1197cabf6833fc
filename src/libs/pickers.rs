//! Pickers for the values a time entry or project needs.
//!
//! Each picker fetches its candidates from the [`TimeTracker`] and asks the
//! [`Prompter`]. Optional values (project, task, client) offer an explicit
//! "none" entry, and pickers with nothing to choose from return without
//! prompting.

use crate::api::{ProjectDto, TaskDto, TimeTracker, WorkspaceDto};
use crate::libs::messages::Message;
use crate::libs::prompts::{Prompter, Selection};
use crate::msg_bail_anyhow;
use anyhow::Result;

/// Project colors offered when creating a project, as `(label, hex)`.
pub const PROJECT_COLORS: [(&str, &str); 10] = [
    ("Blue", "#03a9f4"),
    ("Indigo", "#3f51b5"),
    ("Purple", "#9c27b0"),
    ("Pink", "#e91e63"),
    ("Red", "#f44336"),
    ("Orange", "#ff9800"),
    ("Yellow", "#ffc107"),
    ("Green", "#4caf50"),
    ("Teal", "#009688"),
    ("Grey", "#607d8b"),
];

pub async fn select_workspace<A: TimeTracker, P: Prompter>(api: &A, prompter: &P) -> Result<Selection<WorkspaceDto>> {
    let mut workspaces = api.workspaces().await?;
    if workspaces.is_empty() {
        msg_bail_anyhow!(Message::NoWorkspacesFound);
    }
    let items: Vec<String> = workspaces.iter().map(|w| w.name.clone()).collect();
    let choice = prompter.select(&Message::PromptSelectWorkspace.to_string(), &items).await?;
    Ok(choice.map(|index| workspaces.swap_remove(index)))
}

/// `Selected(None)` means the user explicitly chose no project.
pub async fn select_project<A: TimeTracker, P: Prompter>(api: &A, prompter: &P, workspace_id: &str) -> Result<Selection<Option<ProjectDto>>> {
    let mut projects = api.projects(workspace_id).await?;
    let mut items = vec![Message::NoProjectOption.to_string()];
    items.extend(projects.iter().map(|p| p.name.clone()));

    let choice = prompter.select(&Message::PromptSelectProject.to_string(), &items).await?;
    Ok(choice.map(|index| match index {
        0 => None,
        index => Some(projects.swap_remove(index - 1)),
    }))
}

/// Skips the prompt when there is no project or the project has no tasks.
pub async fn select_task<A: TimeTracker, P: Prompter>(
    api: &A,
    prompter: &P,
    workspace_id: &str,
    project_id: Option<&str>,
) -> Result<Selection<Option<TaskDto>>> {
    let Some(project_id) = project_id else {
        return Ok(Selection::Selected(None));
    };
    let mut tasks = api.tasks(workspace_id, project_id).await?;
    if tasks.is_empty() {
        return Ok(Selection::Selected(None));
    }

    let mut items = vec![Message::NoTaskOption.to_string()];
    items.extend(tasks.iter().map(|t| t.name.clone()));

    let choice = prompter.select(&Message::PromptSelectTask.to_string(), &items).await?;
    Ok(choice.map(|index| match index {
        0 => None,
        index => Some(tasks.swap_remove(index - 1)),
    }))
}

pub async fn describe<P: Prompter>(prompter: &P, default: Option<&str>) -> Result<Selection<String>> {
    prompter.input(&Message::PromptDescription.to_string(), default).await
}

pub async fn select_billable<P: Prompter>(prompter: &P, default: bool) -> Result<Selection<bool>> {
    prompter.confirm(&Message::PromptBillable.to_string(), default).await
}

/// Returns tag ids. A workspace without tags yields an empty selection.
pub async fn select_tags<A: TimeTracker, P: Prompter>(api: &A, prompter: &P, workspace_id: &str) -> Result<Selection<Vec<String>>> {
    let tags = api.tags(workspace_id).await?;
    if tags.is_empty() {
        return Ok(Selection::Selected(Vec::new()));
    }
    let items: Vec<String> = tags.iter().map(|t| t.name.clone()).collect();
    let choice = prompter.multi_select(&Message::PromptSelectTags.to_string(), &items).await?;
    Ok(choice.map(|indices| indices.into_iter().map(|index| tags[index].id.clone()).collect()))
}

/// Returns the client id, `Selected(None)` for "no client".
pub async fn select_client<A: TimeTracker, P: Prompter>(api: &A, prompter: &P, workspace_id: &str) -> Result<Selection<Option<String>>> {
    let clients = api.clients(workspace_id).await?;
    if clients.is_empty() {
        return Ok(Selection::Selected(None));
    }
    let mut items = vec![Message::NoClientOption.to_string()];
    items.extend(clients.iter().map(|c| c.name.clone()));

    let choice = prompter.select(&Message::PromptSelectClient.to_string(), &items).await?;
    Ok(choice.map(|index| match index {
        0 => None,
        index => Some(clients[index - 1].id.clone()),
    }))
}

/// An empty name counts as cancelled.
pub async fn project_name<P: Prompter>(prompter: &P) -> Result<Selection<String>> {
    let name = prompter.input(&Message::PromptProjectName.to_string(), None).await?;
    Ok(match name {
        Selection::Selected(name) if !name.trim().is_empty() => Selection::Selected(name.trim().to_string()),
        _ => Selection::Cancelled,
    })
}

/// Returns the hex value of the chosen color.
pub async fn select_color<P: Prompter>(prompter: &P) -> Result<Selection<String>> {
    let items: Vec<String> = PROJECT_COLORS.iter().map(|(label, hex)| format!("{} ({})", label, hex)).collect();
    let choice = prompter.select(&Message::PromptSelectColor.to_string(), &items).await?;
    Ok(choice.map(|index| PROJECT_COLORS[index].1.to_string()))
}

pub async fn select_visibility<P: Prompter>(prompter: &P) -> Result<Selection<bool>> {
    prompter.confirm(&Message::PromptProjectPublic.to_string(), false).await
}
