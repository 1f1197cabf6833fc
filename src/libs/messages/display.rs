//! Display implementation for clockin messages.
//!
//! All user-facing text is defined here so that commands, the status surface
//! and the editor bridge render identical wording.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TRACKING MESSAGES ===
            Message::TrackingStarted => "Tracking started".to_string(),
            Message::TrackingStopped => "Tracking stopped".to_string(),
            Message::TrackingNotActive => "No time entry is being tracked".to_string(),
            Message::TrackingCleared => "Stored tracking session cleared".to_string(),
            Message::TrackingStartFailed(error) => format!("Failed to start tracking: {}", error),
            Message::TrackingStopFailed(error) => format!("Failed to stop tracking: {}", error),
            Message::TrackingAborted(operation) => format!("{} aborted: selection cancelled", operation),

            // === IDLE MESSAGES ===
            Message::IdlePrompt(duration) => {
                format!("You were idle for: {}. Do you want to delete this from your Clockify time?", duration)
            }
            Message::IdleChoiceDiscard => "Yes".to_string(),
            Message::IdleChoiceDiscardAndResume => "Yes, continue tracking".to_string(),
            Message::IdleChoiceKeep => "No".to_string(),
            Message::IdleKept => "Idle time kept in the current entry".to_string(),
            Message::IdleDiscarded(duration) => format!("Removed {} of idle time from the current entry", duration),
            Message::IdleBelowThreshold => "Idle threshold not reached".to_string(),
            Message::IdleArmed(seconds) => format!("Focus lost, idle notification armed for {}s", seconds),
            Message::IdleNotification(user) => format!("@{} seems to be AFK but still clocking in. Give them a poke!", user),
            Message::NotifierFailed(error) => format!("Failed to send idle notification: {}", error),
            Message::NotifierNotConfigured => "Telegram notifier is not configured, skipping idle notification".to_string(),

            // === STATUS MESSAGES ===
            Message::StatusTooltip => "Tracked time today vs. your daily average.".to_string(),
            Message::StatusTrackingSuffix => "Tracking...".to_string(),
            Message::StatusAverageFailed(error) => format!("Failed to compute the 90-day average: {}", error),
            Message::StatusTodayFailed(error) => format!("Failed to sum today's time entries: {}", error),

            // === SELECTION MESSAGES ===
            Message::WorkspaceSelected(name) => format!("Workspace '{}' selected", name),
            Message::ProjectSelected(name) => format!("Project '{}' selected", name),
            Message::ProjectAdded(name) => format!("Project '{}' added", name),
            Message::NoWorkspaceSelected => "No workspace selected".to_string(),
            Message::NoProjectSelected => "No project selected".to_string(),
            Message::NoWorkspacesFound => "No workspaces found for this API key".to_string(),
            Message::NoProjectOption => "(no project)".to_string(),
            Message::NoTaskOption => "(no task)".to_string(),
            Message::NoClientOption => "(no client)".to_string(),
            Message::NoItemsFound(view) => format!("No {} found", view),

            // === PROMPTS ===
            Message::PromptSelectWorkspace => "Select a workspace".to_string(),
            Message::PromptSelectProject => "Select a project".to_string(),
            Message::PromptSelectTask => "Select a task".to_string(),
            Message::PromptDescription => "What are you working on?".to_string(),
            Message::PromptBillable => "Is this time billable?".to_string(),
            Message::PromptSelectTags => "Select tags (space to select, enter to confirm)".to_string(),
            Message::PromptProjectName => "Enter the project name".to_string(),
            Message::PromptSelectClient => "Select a client".to_string(),
            Message::PromptSelectColor => "Select a project color".to_string(),
            Message::PromptProjectPublic => "Should the project be public?".to_string(),
            Message::PromptClockifyApiKey => "Enter your Clockify API key".to_string(),
            Message::PromptTelegramApiKey => "Enter your Telegram API key".to_string(),
            Message::PromptClockifyUrl => "Enter the Clockify API URL".to_string(),
            Message::PromptTelegramChatId => "Enter the Telegram chat id".to_string(),
            Message::PromptTelegramUserName => "Enter the Telegram user name to mention".to_string(),
            Message::PromptMaxIdleTime => "Enter the idle notification delay (seconds)".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleClockify => "Clockify settings".to_string(),
            Message::ConfigModuleTelegram => "Telegram settings".to_string(),
            Message::ConfigModuleIdle => "Idle detection settings".to_string(),
            Message::TelegramApiKeySaved => "Telegram API key saved".to_string(),
            Message::ClockifyApiKeySaved => "Clockify API key saved".to_string(),

            // === API MESSAGES ===
            Message::ApiRequestFailed(error) => format!("Clockify request failed: {}", error),

            // === WATCHER MESSAGES ===
            Message::WatcherStarted => "Watching editor events on stdin".to_string(),
            Message::WatcherShuttingDown => "Watcher shutting down".to_string(),
            Message::WatcherReceivedSigterm => "Received SIGTERM".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT".to_string(),
            Message::WatcherInputClosed => "Editor closed the event stream".to_string(),
            Message::WatcherSignalHandlerFailed(error) => format!("Failed to install signal handlers: {}", error),
            Message::BridgeInvalidMessage(error) => format!("Ignoring malformed editor message: {}", error),
            Message::BridgeWriteFailed(error) => format!("Failed to write to the editor: {}", error),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidTime(value) => format!("Invalid time '{}', expected HH:MM", value),
        };

        write!(f, "{}", text)
    }
}
