use super::{ApiError, Notifier};
use crate::libs::config::{Config, ConfigModule};
use crate::libs::messages::Message;
use crate::libs::secret::{Secret, TELEGRAM_SECRET_FILE};
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_URL: &str = "https://api.telegram.org";

#[derive(Serialize, Debug)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Telegram bot client that pokes a chat when the user looks idle.
///
/// An instance without an API key is valid; it logs and skips every message.
#[derive(Clone, Debug)]
pub struct Telegram {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    config: TelegramConfig,
}

impl Telegram {
    pub fn new(config: &TelegramConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: API_URL.to_string(),
            api_key,
            config: config.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.telegram.clone().unwrap_or_default(), TelegramConfig::secret().get())
    }

    pub async fn send_message(&self, text: &str) -> Result<()> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey { service: "Telegram" })?;
        let path = "sendMessage";
        let url = format!("{}/bot{}/{}", self.api_url, api_key, path);
        let res = self
            .client
            .post(url)
            .json(&SendMessageRequest {
                chat_id: &self.config.chat_id,
                text,
            })
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ApiError::Status {
                method: "POST",
                path: path.to_string(),
                status,
                body,
            }
            .into());
        }
        tracing::debug!(%status, body = %body, "telegram message sent");
        Ok(())
    }
}

impl Notifier for Telegram {
    async fn notify_idle(&self) -> Result<()> {
        if self.api_key.is_none() || self.config.chat_id.is_empty() {
            tracing::debug!("{}", Message::NotifierNotConfigured);
            return Ok(());
        }
        self.send_message(&Message::IdleNotification(self.config.user_name.clone()).to_string()).await
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TelegramConfig {
    pub chat_id: String,
    pub user_name: String,
}

impl TelegramConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "telegram".to_string(),
            name: "Telegram".to_string(),
        }
    }

    pub fn secret() -> Secret {
        Secret::new(TELEGRAM_SECRET_FILE, &Message::PromptTelegramApiKey.to_string())
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleTelegram);
        Ok(Self {
            chat_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTelegramChatId.to_string())
                .default(config.chat_id)
                .interact_text()?,
            user_name: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTelegramUserName.to_string())
                .default(config.user_name)
                .interact_text()?,
        })
    }
}
