//! Core library modules for clockin.
//!
//! ## Layout
//!
//! - **Infrastructure**: configuration, data storage, secrets, messaging
//! - **Domain**: tracking session, idle detection, daily summary
//! - **Interaction**: prompts, pickers, status surface, list views
//! - **Control**: the [`controller::Controller`] and the editor [`bridge`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clockin::libs::summary::DailySummary;
//! use chrono::Duration;
//!
//! let summary = DailySummary::new(Some(Duration::hours(3)), Some(Duration::hours(2)));
//! assert_eq!(summary.display(false).color, "#4caf50");
//! ```

pub mod bridge;
pub mod config;
pub mod controller;
pub mod data_storage;
pub mod formatter;
pub mod idle;
pub mod messages;
pub mod pickers;
pub mod prompts;
pub mod providers;
pub mod secret;
pub mod selection;
pub mod session;
pub mod summary;
pub mod surface;
pub mod tracking;
pub mod view;
