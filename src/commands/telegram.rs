use crate::api::TelegramConfig;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

/// Stores the bot key encrypted next to the configuration.
pub fn cmd() -> Result<()> {
    TelegramConfig::secret().prompt()?;
    msg_success!(Message::TelegramApiKeySaved);
    Ok(())
}
