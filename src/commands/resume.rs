use super::terminal_controller;
use anyhow::Result;

/// Prompts only for the fields missing from the last session.
pub async fn cmd() -> Result<()> {
    terminal_controller()?.resume_tracking().await?;
    Ok(())
}
