use super::terminal_controller;
use crate::api::TimeTracker;
use crate::libs::messages::Message;
use crate::libs::summary::start_of_day;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info};
use anyhow::Result;
use chrono::{Duration, Local, Utc};
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ListView {
    Workspaces,
    Clients,
    Projects,
    Tasks,
    Tags,
    TimeEntries,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(value_enum)]
    view: ListView,

    /// Days of time entries to show, today included
    #[arg(short, long, default_value_t = 1)]
    days: i64,
}

/// Lists within the selected workspace, or the summary workspace if none is selected.
pub async fn cmd(args: ListArgs) -> Result<()> {
    let controller = terminal_controller()?;
    let api = controller.api();
    let selected_workspace = controller.selected_workspace()?.map(|w| w.id);
    let selected_project = controller.selected_project()?.map(|p| p.id);

    if args.view == ListView::Workspaces {
        let workspaces = api.workspaces().await?;
        return View::workspaces(&workspaces, selected_workspace.as_deref());
    }

    let workspace_id = match selected_workspace {
        Some(id) => id,
        None => match controller.summary_workspace().await? {
            Some(id) => id,
            None => msg_bail_anyhow!(Message::NoWorkspaceSelected),
        },
    };

    match args.view {
        ListView::Workspaces => Ok(()),
        ListView::Clients => View::clients(&api.clients(&workspace_id).await?),
        ListView::Projects => View::projects(&api.projects(&workspace_id).await?, selected_project.as_deref()),
        ListView::Tasks => {
            let Some(project_id) = selected_project else {
                msg_bail_anyhow!(Message::NoProjectSelected);
            };
            View::tasks(&api.tasks(&workspace_id, &project_id).await?)
        }
        ListView::Tags => View::tags(&api.tags(&workspace_id).await?),
        ListView::TimeEntries => {
            let now = Local::now();
            let since = start_of_day(&now) - Duration::days(args.days.max(1) - 1);
            let entries = api.time_entries(&workspace_id, since, now.with_timezone(&Utc)).await?;
            if entries.is_empty() {
                msg_info!(Message::NoItemsFound("time entries".to_string()));
                return Ok(());
            }
            View::time_entries(&entries)
        }
    }
}
