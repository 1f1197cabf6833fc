use crate::api::{ClientDto, ProjectDto, TagDto, TaskDto, TimeEntryDto, WorkspaceDto};
use crate::libs::formatter::{as_hours, round_one_decimal};
use anyhow::Result;
use chrono::{Local, Utc};
use prettytable::{row, Table};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct View {}

impl View {
    pub fn workspaces(workspaces: &[WorkspaceDto], selected: Option<&str>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "ID", "NAME"]);
        for workspace in workspaces {
            table.add_row(row![marker(selected, &workspace.id), workspace.id, workspace.name]);
        }
        table.printstd();

        Ok(())
    }

    pub fn clients(clients: &[ClientDto]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME"]);
        for client in clients {
            table.add_row(row![client.id, client.name]);
        }
        table.printstd();

        Ok(())
    }

    pub fn projects(projects: &[ProjectDto], selected: Option<&str>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "ID", "NAME", "COLOR", "BILLABLE", "PUBLIC"]);
        for project in projects {
            table.add_row(row![
                marker(selected, &project.id),
                project.id,
                project.name,
                project.color.as_deref().unwrap_or(""),
                yes_no(project.billable),
                yes_no(project.public)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tasks(tasks: &[TaskDto]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "STATUS"]);
        for task in tasks {
            table.add_row(row![task.id, task.name, task.status.as_deref().unwrap_or("")]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tags(tags: &[TagDto]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME"]);
        for tag in tags {
            table.add_row(row![tag.id, tag.name]);
        }
        table.printstd();

        Ok(())
    }

    /// Running entries show no end and count up to now.
    pub fn time_entries(entries: &[TimeEntryDto]) -> Result<()> {
        let mut table = Table::new();
        let now = Utc::now();

        table.add_row(row!["START", "END", "HOURS", "DESCRIPTION", "BILLABLE"]);
        for entry in entries {
            let interval = &entry.time_interval;
            let end = interval
                .end
                .map(|end| end.with_timezone(&Local).format(TIME_FORMAT).to_string())
                .unwrap_or_else(|| "running".to_string());
            let hours = round_one_decimal(as_hours(interval.end.unwrap_or(now) - interval.start));

            table.add_row(row![
                interval.start.with_timezone(&Local).format(TIME_FORMAT),
                end,
                hours,
                entry.description.as_deref().unwrap_or(""),
                yes_no(entry.billable)
            ]);
        }
        table.printstd();

        Ok(())
    }
}

fn marker(selected: Option<&str>, id: &str) -> &'static str {
    if selected == Some(id) {
        "*"
    } else {
        ""
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
