use crate::libs::messages::Message;
use crate::libs::summary::StatusDisplay;
use crate::{msg_error, msg_print, msg_success};

/// Where user-visible output goes: the status indicator and notifications.
pub trait Surface {
    fn show_status(&self, status: &StatusDisplay);

    fn info(&self, message: &Message);

    fn error(&self, message: &Message);
}

/// Prints to the terminal through the message macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSurface;

impl Surface for TerminalSurface {
    fn show_status(&self, status: &StatusDisplay) {
        msg_print!(format!("{}  [{}]\n{}", status.text, status.color, status.tooltip));
    }

    fn info(&self, message: &Message) {
        msg_success!(message);
    }

    fn error(&self, message: &Message) {
        msg_error!(message);
    }
}
