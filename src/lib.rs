//! # clockin - Clockify time tracking from the editor and the terminal
//!
//! Starts, stops and resumes Clockify time entries, shows how today's tracked
//! time compares with the rolling daily average, and notices when the editor
//! has been out of focus while a session keeps running.
//!
//! ## Features
//!
//! - **Tracking**: start, resume and stop entries; every prompt answer is
//!   persisted immediately so an interrupted flow resumes where it stopped
//! - **Status**: today vs. 90-day daily average with a traffic-light color
//! - **Idle detection**: a Telegram ping after `max_idle_time` unfocused, and
//!   an offer to discard the idle interval when focus returns
//! - **Editor bridge**: `clockin watch` speaks JSON lines over stdio
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clap::Parser;
//! use clockin::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::parse().run().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
