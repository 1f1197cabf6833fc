/// Every user-facing text in clockin, grouped by the feature that emits it.
///
/// The text itself lives in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TRACKING MESSAGES ===
    TrackingStarted,
    TrackingStopped,
    TrackingNotActive,
    TrackingCleared,
    TrackingStartFailed(String), // error
    TrackingStopFailed(String),  // error
    TrackingAborted(String),     // operation name

    // === IDLE MESSAGES ===
    IdlePrompt(String), // formatted idle duration
    IdleChoiceDiscard,
    IdleChoiceDiscardAndResume,
    IdleChoiceKeep,
    IdleKept,
    IdleDiscarded(String), // formatted idle duration
    IdleBelowThreshold,
    IdleArmed(u64), // seconds
    IdleNotification(String), // user name
    NotifierFailed(String),   // error
    NotifierNotConfigured,

    // === STATUS MESSAGES ===
    StatusTooltip,
    StatusTrackingSuffix,
    StatusAverageFailed(String), // error
    StatusTodayFailed(String),   // error

    // === SELECTION MESSAGES ===
    WorkspaceSelected(String), // name
    ProjectSelected(String),   // name
    ProjectAdded(String),      // name
    NoWorkspaceSelected,
    NoProjectSelected,
    NoWorkspacesFound,
    NoProjectOption,
    NoTaskOption,
    NoClientOption,
    NoItemsFound(String), // view name

    // === PROMPTS ===
    PromptSelectWorkspace,
    PromptSelectProject,
    PromptSelectTask,
    PromptDescription,
    PromptBillable,
    PromptSelectTags,
    PromptProjectName,
    PromptSelectClient,
    PromptSelectColor,
    PromptProjectPublic,
    PromptClockifyApiKey,
    PromptTelegramApiKey,
    PromptClockifyUrl,
    PromptTelegramChatId,
    PromptTelegramUserName,
    PromptMaxIdleTime,
    PromptSelectModules,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleClockify,
    ConfigModuleTelegram,
    ConfigModuleIdle,
    TelegramApiKeySaved,
    ClockifyApiKeySaved,

    // === API MESSAGES ===
    ApiRequestFailed(String), // error

    // === WATCHER MESSAGES ===
    WatcherStarted,
    WatcherShuttingDown,
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherInputClosed,
    WatcherSignalHandlerFailed(String), // error
    BridgeInvalidMessage(String),       // error
    BridgeWriteFailed(String),          // error

    // === GENERAL MESSAGES ===
    OperationCancelled,
    InvalidTime(String), // raw input
}
