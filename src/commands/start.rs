use super::terminal_controller;
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    terminal_controller()?.start_tracking().await?;
    Ok(())
}
