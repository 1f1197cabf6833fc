//! Message display macros with conditional tracing support.
//!
//! Every macro takes a [`Message`](super::Message) (or anything `Display`) and
//! routes it either to the console or to `tracing`:
//!
//! ```text
//! msg_info!(..) ──▶ log mode? ──yes──▶ tracing::info!  (stderr)
//!                       │
//!                       └──no───▶ println! / eprintln!
//! ```
//!
//! Log mode is on when `CLOCKIN_DEBUG` or `RUST_LOG` is set, or when
//! [`enable_log_mode`] was called. `clockin watch` enables it because stdout
//! carries the editor bridge protocol and must not receive free text.

use std::sync::OnceLock;

/// Cached log-mode decision; fixed for the lifetime of the process.
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("CLOCKIN_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Forces every message macro through `tracing` for the rest of the process.
///
/// Has no effect if a macro already ran in console mode.
pub fn enable_log_mode() {
    let _ = DEBUG_MODE.set(true);
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
