//! Editor bridge loop.
//!
//! Reads editor messages from stdin on a background task and handles them one
//! at a time until stdin closes or the process receives SIGTERM/SIGINT, even
//! while a prompt is waiting for the editor.
//! Everything except protocol messages goes to stderr.

use crate::api::{Clockify, Telegram};
use crate::db::state::State;
use crate::libs::bridge::{self, BridgePrompter, BridgeSurface, BridgeWriter, NotifyLevel, Outgoing};
use crate::libs::config::Config;
use crate::libs::controller::Controller;
use crate::libs::messages::macros::enable_log_mode;
use crate::libs::messages::Message;
use crate::{msg_error, msg_info, msg_warning};
use anyhow::Result;
use tokio::io::BufReader;
use tokio::sync::mpsc;

pub async fn cmd() -> Result<()> {
    enable_log_mode();

    let config = Config::read()?;
    let writer = BridgeWriter::stdout();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (answers_tx, answers_rx) = mpsc::unbounded_channel();

    let mut controller = Controller::new(
        Clockify::from_config(&config)?,
        BridgePrompter::new(writer.clone(), answers_rx),
        Telegram::from_config(&config),
        State::new()?,
        Box::new(BridgeSurface::new(writer.clone())),
        bridge::providers(&writer),
        &config.idle(),
    );

    let reader = tokio::spawn(bridge::read_events(BufReader::new(tokio::io::stdin()), events_tx, answers_tx));
    msg_info!(Message::WatcherStarted);

    if let Err(e) = controller.update_status(false).await {
        report(&writer, e);
    }

    bridge::serve(&mut controller, events_rx, shutdown_signal(), |e| report(&writer, e)).await;

    msg_info!(Message::WatcherShuttingDown);
    controller.shutdown();
    reader.abort();
    Ok(())
}

/// Errors never end the loop; they are logged and shown in the editor.
fn report(writer: &BridgeWriter, error: anyhow::Error) {
    msg_error!(error);
    writer.send_or_warn(&Outgoing::Notify {
        level: NotifyLevel::Error,
        message: error.to_string(),
    });
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                msg_warning!(Message::WatcherSignalHandlerFailed(e.to_string()));
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => msg_info!(Message::WatcherReceivedSigterm),
            _ = sigint.recv() => msg_info!(Message::WatcherReceivedSigint),
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => msg_info!(Message::WatcherReceivedSigint),
            Err(e) => {
                msg_warning!(Message::WatcherSignalHandlerFailed(e.to_string()));
                std::future::pending::<()>().await;
            }
        }
    }
}
