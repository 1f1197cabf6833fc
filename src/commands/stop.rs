use super::terminal_controller;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use clap::Args;

#[derive(Debug, Args)]
pub struct StopArgs {
    /// Stop the entry at this local time today (HH:MM) instead of now
    #[arg(long)]
    at: Option<String>,

    /// Also forget the stored session fields, so the next resume prompts again
    #[arg(long)]
    clear: bool,
}

pub async fn cmd(args: StopArgs) -> Result<()> {
    let mut controller = terminal_controller()?;

    match args.at.as_deref() {
        Some(at) => controller.stop_tracking_at(parse_local_time(at)?).await?,
        None => controller.stop_tracking().await?,
    };

    if args.clear {
        controller.forget()?;
    }
    Ok(())
}

/// Today's date at `value` in the local zone.
pub fn parse_local_time(value: &str) -> Result<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| msg_error_anyhow!(Message::InvalidTime(value.to_string())))?;
    let local = Local
        .from_local_datetime(&Local::now().date_naive().and_time(time))
        .earliest()
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidTime(value.to_string())))?;
    Ok(local.with_timezone(&Utc))
}

