//! Editor bridge: newline-delimited JSON over stdio.
//!
//! An editor extension spawns `clockin watch` and talks to it through one
//! JSON object per line, tagged by `type`.
//!
//! ```text
//! editor ──stdin──▶  focus { focused }
//!                    status { refresh_average }
//!                    command { name: start | stop | resume }
//!                    answer { id, value }            (reply to a prompt)
//!
//! editor ◀─stdout──  status { text, tooltip, color }
//!                    refresh { view, element }
//!                    prompt { id, kind, message, items, default }
//!                    notify { level, message }
//! ```
//!
//! Answers are routed to their own channel so a prompt can be answered
//! while the controller is still busy with the event that raised it; every
//! other message is queued and handled in order by [`dispatch`].

use crate::api::{Notifier, TimeTracker};
use crate::libs::controller::Controller;
use crate::libs::messages::Message;
use crate::libs::prompts::{Prompter, Selection};
use crate::libs::providers::{ProviderStore, TreeProvider, ViewKind};
use crate::libs::summary::StatusDisplay;
use crate::libs::surface::Surface;
use crate::{msg_bail_anyhow, msg_info};
use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    Start,
    Stop,
    Resume,
}

/// Reply to a [`Outgoing::Prompt`]. A `null` value means the user dismissed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: u64,
    #[serde(default)]
    pub value: Value,
}

/// Message from the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Incoming {
    Focus {
        focused: bool,
    },
    Status {
        #[serde(default)]
        refresh_average: bool,
    },
    Command {
        name: CommandName,
    },
    Answer(Answer),
}

/// An incoming message stamped with the time it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorEvent {
    pub received_at: DateTime<Utc>,
    pub message: Incoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Select,
    MultiSelect,
    Input,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyLevel {
    Info,
    Error,
}

/// Message to the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outgoing {
    Status(StatusDisplay),
    Refresh {
        view: ViewKind,
        element: Option<String>,
    },
    Prompt {
        id: u64,
        kind: PromptKind,
        message: String,
        items: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
    },
    Notify {
        level: NotifyLevel,
        message: String,
    },
}

/// Shared line writer; one message per line, flushed immediately.
#[derive(Clone)]
pub struct BridgeWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl BridgeWriter {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn send(&self, message: &Outgoing) -> Result<()> {
        let line = serde_json::to_string(message)?;
        let mut writer = self.inner.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    /// Like [`send`](Self::send), but only logs a failure.
    pub fn send_or_warn(&self, message: &Outgoing) {
        if let Err(e) = self.send(message) {
            tracing::warn!("{}", Message::BridgeWriteFailed(e.to_string()));
        }
    }
}

pub struct BridgeSurface {
    writer: BridgeWriter,
}

impl BridgeSurface {
    pub fn new(writer: BridgeWriter) -> Self {
        Self { writer }
    }
}

impl Surface for BridgeSurface {
    fn show_status(&self, status: &StatusDisplay) {
        self.writer.send_or_warn(&Outgoing::Status(status.clone()));
    }

    fn info(&self, message: &Message) {
        self.writer.send_or_warn(&Outgoing::Notify {
            level: NotifyLevel::Info,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &Message) {
        self.writer.send_or_warn(&Outgoing::Notify {
            level: NotifyLevel::Error,
            message: message.to_string(),
        });
    }
}

pub struct BridgeProvider {
    view: ViewKind,
    writer: BridgeWriter,
}

impl BridgeProvider {
    pub fn new(view: ViewKind, writer: BridgeWriter) -> Self {
        Self { view, writer }
    }
}

impl TreeProvider for BridgeProvider {
    fn refresh(&self, element: Option<&str>) {
        self.writer.send_or_warn(&Outgoing::Refresh {
            view: self.view,
            element: element.map(str::to_string),
        });
    }
}

/// Every view forwarded to the editor.
pub fn providers(writer: &BridgeWriter) -> ProviderStore {
    let mut store = ProviderStore::new();
    for view in ViewKind::ALL {
        store.register(view, Box::new(BridgeProvider::new(view, writer.clone())));
    }
    store
}

/// Sends prompts to the editor and waits for the matching answer.
///
/// Answers with the wrong shape or an out-of-range index count as cancelled.
pub struct BridgePrompter {
    writer: BridgeWriter,
    answers: tokio::sync::Mutex<UnboundedReceiver<Answer>>,
    next_id: AtomicU64,
}

impl BridgePrompter {
    pub fn new(writer: BridgeWriter, answers: UnboundedReceiver<Answer>) -> Self {
        Self {
            writer,
            answers: tokio::sync::Mutex::new(answers),
            next_id: AtomicU64::new(1),
        }
    }

    async fn ask(&self, kind: PromptKind, message: &str, items: &[String], default: Option<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.writer.send(&Outgoing::Prompt {
            id,
            kind,
            message: message.to_string(),
            items: items.to_vec(),
            default,
        })?;

        let mut answers = self.answers.lock().await;
        loop {
            let Some(answer) = answers.recv().await else {
                msg_bail_anyhow!(Message::WatcherInputClosed);
            };
            if answer.id == id {
                return Ok(answer.value);
            }
            tracing::debug!(expected = id, received = answer.id, "ignoring stale answer");
        }
    }
}

fn index_in(value: &Value, len: usize) -> Option<usize> {
    value.as_u64().map(|i| i as usize).filter(|i| *i < len)
}

impl Prompter for BridgePrompter {
    async fn select(&self, message: &str, items: &[String]) -> Result<Selection<usize>> {
        let value = self.ask(PromptKind::Select, message, items, None).await?;
        Ok(index_in(&value, items.len()).into())
    }

    async fn multi_select(&self, message: &str, items: &[String]) -> Result<Selection<Vec<usize>>> {
        let value = self.ask(PromptKind::MultiSelect, message, items, None).await?;
        let indices = value
            .as_array()
            .and_then(|values| values.iter().map(|v| index_in(v, items.len())).collect::<Option<Vec<_>>>());
        Ok(indices.into())
    }

    async fn input(&self, message: &str, default: Option<&str>) -> Result<Selection<String>> {
        let default = default.map(|d| Value::String(d.to_string()));
        let value = self.ask(PromptKind::Input, message, &[], default).await?;
        Ok(value.as_str().map(str::to_string).into())
    }

    async fn confirm(&self, message: &str, default: bool) -> Result<Selection<bool>> {
        let value = self.ask(PromptKind::Confirm, message, &[], Some(Value::Bool(default))).await?;
        Ok(value.as_bool().into())
    }
}

/// Reads messages until EOF, routing answers and events to their channels.
///
/// Lines that are not valid messages are logged and skipped.
pub async fn read_events<R: AsyncBufRead + Unpin>(reader: R, events: UnboundedSender<EditorEvent>, answers: UnboundedSender<Answer>) -> Result<()> {
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let delivered = match serde_json::from_str::<Incoming>(line) {
            Ok(Incoming::Answer(answer)) => answers.send(answer).is_ok(),
            Ok(message) => events
                .send(EditorEvent {
                    received_at: Utc::now(),
                    message,
                })
                .is_ok(),
            Err(e) => {
                tracing::warn!("{}", Message::BridgeInvalidMessage(e.to_string()));
                true
            }
        };
        if !delivered {
            break;
        }
    }
    tracing::debug!("{}", Message::WatcherInputClosed);
    Ok(())
}

/// Handles one editor event.
pub async fn dispatch<A: TimeTracker, P: Prompter, N: Notifier>(controller: &mut Controller<A, P, N>, event: EditorEvent) -> Result<()> {
    match event.message {
        Incoming::Focus { focused } => {
            controller.on_focus_change(focused, event.received_at).await?;
        }
        Incoming::Status { refresh_average } => {
            controller.update_status(refresh_average).await?;
        }
        Incoming::Command { name } => match name {
            CommandName::Start => {
                controller.start_tracking().await?;
            }
            CommandName::Stop => {
                controller.stop_tracking().await?;
            }
            CommandName::Resume => {
                controller.resume_tracking().await?;
            }
        },
        Incoming::Answer(answer) => {
            tracing::debug!(id = answer.id, "answer without a pending prompt");
        }
    }
    Ok(())
}

/// Handles events in order until the channel closes or `shutdown` completes.
///
/// `shutdown` is raced against the event being handled too, so a prompt
/// still waiting for its answer does not hold up the exit. Errors go to
/// `report` and never end the loop.
pub async fn serve<A, P, N, F>(controller: &mut Controller<A, P, N>, mut events: UnboundedReceiver<EditorEvent>, shutdown: F, report: impl Fn(anyhow::Error))
where
    A: TimeTracker,
    P: Prompter,
    N: Notifier,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let next = tokio::select! {
            _ = &mut shutdown => return,
            event = events.recv() => event,
        };
        let Some(event) = next else {
            msg_info!(Message::WatcherInputClosed);
            return;
        };

        tokio::select! {
            _ = &mut shutdown => return,
            result = dispatch(controller, event) => {
                if let Err(e) = result {
                    report(e);
                }
            }
        }
    }
}
