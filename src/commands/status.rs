use super::terminal_controller;
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    terminal_controller()?.update_status(true).await?;
    Ok(())
}
