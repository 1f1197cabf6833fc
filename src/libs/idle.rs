//! Idle detection from editor focus transitions.
//!
//! The detector keeps the last focus state and reacts only to changes:
//!
//! - **focus lost**: remember when, and (while tracking) arm one deferred
//!   task that pings the [`Notifier`] after `max_idle_time`.
//! - **focus regained**: abort the deferred task, measure how long the editor
//!   was unfocused and, past the noise threshold, emit an [`IdleEvent`].
//!
//! At most one deferred task exists at any time; arming aborts the previous
//! one and a focus regain aborts it exactly once.

use crate::api::Notifier;
use crate::libs::config::IdleConfig;
use crate::libs::formatter::format_idle_duration;
use crate::libs::messages::Message;
use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;

/// Focus gaps up to and including this many milliseconds are ignored.
pub const NOISE_THRESHOLD_MS: i64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    pub focused: bool,
    pub time_when_focus_lost: Option<DateTime<Utc>>,
    /// Whether a session was tracking when focus was lost.
    pub tracking_when_lost: bool,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            focused: true,
            time_when_focus_lost: None,
            tracking_when_lost: false,
        }
    }
}

/// One unfocused interval that passed the noise filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleEvent {
    pub idle_start: DateTime<Utc>,
    pub idle_end: DateTime<Utc>,
    pub duration: Duration,
    /// A session was tracking both when focus was lost and when it returned.
    pub tracked_throughout: bool,
}

impl IdleEvent {
    pub fn describe(&self) -> String {
        format_idle_duration(self.duration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Same state as before, or a regain without a recorded loss.
    Unchanged,
    Lost,
    Noise(Duration),
    Idle(IdleEvent),
}

/// The user's answer to the idle reconciliation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleChoice {
    /// Stop the entry at the moment focus was lost.
    Discard,
    /// Same stop, then start an identical entry.
    DiscardAndResume,
    /// Leave the entry untouched.
    Keep,
}

impl IdleChoice {
    pub const ALL: [IdleChoice; 3] = [IdleChoice::Discard, IdleChoice::DiscardAndResume, IdleChoice::Keep];

    pub fn label(&self) -> String {
        match self {
            IdleChoice::Discard => Message::IdleChoiceDiscard,
            IdleChoice::DiscardAndResume => Message::IdleChoiceDiscardAndResume,
            IdleChoice::Keep => Message::IdleChoiceKeep,
        }
        .to_string()
    }

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|choice| choice.label()).collect()
    }

    /// Unknown indices and dismissals both keep the idle time.
    pub fn from_index(index: Option<usize>) -> Self {
        index.and_then(|i| Self::ALL.get(i).copied()).unwrap_or(IdleChoice::Keep)
    }
}

pub struct IdleDetector<N: Notifier> {
    notifier: N,
    max_idle_time: std::time::Duration,
    focus: FocusState,
    pending: Option<JoinHandle<()>>,
}

impl<N: Notifier> IdleDetector<N> {
    pub fn new(notifier: N, config: &IdleConfig) -> Self {
        Self {
            notifier,
            max_idle_time: std::time::Duration::from_secs(config.max_idle_time),
            focus: FocusState::default(),
            pending: None,
        }
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    /// Whether a deferred notification is waiting to fire.
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Must be called from within a tokio runtime; arming spawns a task.
    pub fn on_focus_change(&mut self, focused: bool, tracking: bool, now: DateTime<Utc>) -> FocusOutcome {
        if focused == self.focus.focused {
            return FocusOutcome::Unchanged;
        }
        self.focus.focused = focused;

        if !focused {
            self.focus.time_when_focus_lost = Some(now);
            self.focus.tracking_when_lost = tracking;
            if tracking {
                self.arm();
            }
            return FocusOutcome::Lost;
        }

        self.cancel();
        let Some(lost_at) = self.focus.time_when_focus_lost.take() else {
            return FocusOutcome::Unchanged;
        };

        let elapsed = now - lost_at;
        if elapsed.num_milliseconds() <= NOISE_THRESHOLD_MS {
            tracing::debug!(elapsed_ms = elapsed.num_milliseconds(), "{}", Message::IdleBelowThreshold);
            return FocusOutcome::Noise(elapsed);
        }

        FocusOutcome::Idle(IdleEvent {
            idle_start: lost_at,
            idle_end: now,
            duration: elapsed,
            tracked_throughout: self.focus.tracking_when_lost && tracking,
        })
    }

    fn arm(&mut self) {
        self.cancel();
        let notifier = self.notifier.clone();
        let delay = self.max_idle_time;
        tracing::debug!("{}", Message::IdleArmed(delay.as_secs()));

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = notifier.notify_idle().await {
                tracing::warn!("{}", Message::NotifierFailed(e.to_string()));
            }
        }));
    }

    /// Aborts the deferred notification. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl<N: Notifier> Drop for IdleDetector<N> {
    fn drop(&mut self) {
        self.cancel();
    }
}
