use super::terminal_controller;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct WorkspaceArgs {
    #[command(subcommand)]
    command: WorkspaceCommand,
}

#[derive(Debug, Subcommand)]
enum WorkspaceCommand {
    #[command(about = "Choose the workspace shown in the views")]
    Select,
}

pub async fn cmd(args: WorkspaceArgs) -> Result<()> {
    let mut controller = terminal_controller()?;
    match args.command {
        WorkspaceCommand::Select => {
            controller.pick_workspace().await?;
        }
    }
    Ok(())
}
