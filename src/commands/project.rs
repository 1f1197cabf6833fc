use super::terminal_controller;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    #[command(about = "Choose a project of the selected workspace")]
    Select,
    #[command(about = "Create a project in the selected workspace")]
    Add,
    #[command(about = "Clear the project selection")]
    Refresh,
}

pub async fn cmd(args: ProjectArgs) -> Result<()> {
    let mut controller = terminal_controller()?;
    match args.command {
        ProjectCommand::Select => {
            controller.pick_project().await?;
        }
        ProjectCommand::Add => {
            controller.add_project().await?;
        }
        ProjectCommand::Refresh => controller.refresh_projects(None)?,
    }
    Ok(())
}
