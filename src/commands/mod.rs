pub mod init;
pub mod list;
pub mod project;
pub mod resume;
pub mod start;
pub mod status;
pub mod stop;
pub mod telegram;
pub mod watch;
pub mod workspace;

use crate::api::{Clockify, Telegram};
use crate::db::state::State;
use crate::libs::config::Config;
use crate::libs::controller::Controller;
use crate::libs::prompts::TerminalPrompter;
use crate::libs::providers::ProviderStore;
use crate::libs::surface::TerminalSurface;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Start tracking, prompting for every field")]
    Start,
    #[command(about = "Resume tracking with the last used fields")]
    Resume,
    #[command(about = "Stop the running time entry")]
    Stop(stop::StopArgs),
    #[command(about = "Show today's tracked time against the daily average")]
    Status,
    #[command(about = "Serve the editor bridge on stdin/stdout")]
    Watch,
    #[command(about = "Workspace selection", arg_required_else_help = true)]
    Workspace(workspace::WorkspaceArgs),
    #[command(about = "Project selection and creation", arg_required_else_help = true)]
    Project(project::ProjectArgs),
    #[command(about = "List workspaces, clients, projects, tasks, tags or time entries")]
    List(list::ListArgs),
    #[command(about = "Set the Telegram bot API key")]
    TelegramKey,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => init::cmd(),
            Commands::Start => start::cmd().await,
            Commands::Resume => resume::cmd().await,
            Commands::Stop(args) => stop::cmd(args).await,
            Commands::Status => status::cmd().await,
            Commands::Watch => watch::cmd().await,
            Commands::Workspace(args) => workspace::cmd(args).await,
            Commands::Project(args) => project::cmd(args).await,
            Commands::List(args) => list::cmd(args).await,
            Commands::TelegramKey => telegram::cmd(),
        }
    }
}

pub(crate) type TerminalController = Controller<Clockify, TerminalPrompter, Telegram>;

/// Controller wired to the terminal: dialoguer prompts, printed status.
pub(crate) fn terminal_controller() -> Result<TerminalController> {
    let config = Config::read()?;
    Ok(Controller::new(
        Clockify::from_config(&config)?,
        TerminalPrompter,
        Telegram::from_config(&config),
        State::new()?,
        Box::new(TerminalSurface),
        ProviderStore::logging(),
        &config.idle(),
    ))
}
