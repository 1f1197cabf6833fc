//! Configuration management for clockin.
//!
//! Settings are stored as pretty-printed JSON (`config.json`) in the
//! application data directory. Every module is optional so the tool runs with
//! defaults before `clockin init` has been executed:
//!
//! - **clockify**: API base URL for the time-tracking service
//! - **telegram**: chat and user name used by the idle notifier
//! - **idle**: delay before an unfocused, tracking editor triggers a notification
//!
//! API keys are not part of this file; they are kept encrypted by
//! [`Secret`](super::secret::Secret).
//!
//! ## Example
//!
//! ```json
//! {
//!   "clockify": { "api_url": "https://api.clockify.me/api/v1" },
//!   "telegram": { "chat_id": "-100123", "user_name": "jdoe" },
//!   "idle": { "max_idle_time": 300 }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::api::clockify::ClockifyConfig;
use crate::api::telegram::TelegramConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default idle notification delay, in seconds.
pub const DEFAULT_MAX_IDLE_TIME: u64 = 300;

/// A configurable module shown in the `init` wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Idle detection settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IdleConfig {
    /// Seconds the editor may stay unfocused while tracking before the
    /// notifier is pinged.
    pub max_idle_time: u64,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            max_idle_time: DEFAULT_MAX_IDLE_TIME,
        }
    }
}

impl IdleConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "idle".to_string(),
            name: "Idle detection".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleIdle);
        Ok(Self {
            max_idle_time: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMaxIdleTime.to_string())
                .default(config.max_idle_time)
                .interact_text()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clockify: Option<ClockifyConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<TelegramConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle: Option<IdleConfig>,
}

impl Config {
    /// Loads the configuration, falling back to defaults when no file exists.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        Ok(serde_json::from_str(&config_str)?)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Idle settings with defaults applied.
    pub fn idle(&self) -> IdleConfig {
        self.idle.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard, using the stored values as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [ClockifyConfig::module(), TelegramConfig::module(), IdleConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "clockify" => config.clockify = Some(ClockifyConfig::init(&config.clockify)?),
                "telegram" => config.telegram = Some(TelegramConfig::init(&config.telegram)?),
                "idle" => config.idle = Some(IdleConfig::init(&config.idle)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
