//! Interactive prompts behind a trait.
//!
//! Every prompt resolves to [`Selection::Selected`] or
//! [`Selection::Cancelled`], so flows read as straight-line code:
//!
//! ```rust,ignore
//! let Selection::Selected(index) = prompter.select("Pick one", &items).await? else {
//!     return Ok(());
//! };
//! ```
//!
//! [`TerminalPrompter`] uses `dialoguer`; the editor bridge provides its own
//! implementation that forwards prompts over stdio.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

/// Outcome of a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Selected(T),
    Cancelled,
}

impl<T> Selection<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Selection<U> {
        match self {
            Selection::Selected(value) => Selection::Selected(f(value)),
            Selection::Cancelled => Selection::Cancelled,
        }
    }

    pub fn selected(self) -> Option<T> {
        match self {
            Selection::Selected(value) => Some(value),
            Selection::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Selection::Cancelled)
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Selection::Selected(value),
            None => Selection::Cancelled,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Prompter {
    /// Single choice; yields the index into `items`.
    async fn select(&self, message: &str, items: &[String]) -> Result<Selection<usize>>;

    /// Any number of choices; yields the indices into `items`.
    async fn multi_select(&self, message: &str, items: &[String]) -> Result<Selection<Vec<usize>>>;

    async fn input(&self, message: &str, default: Option<&str>) -> Result<Selection<String>>;

    async fn confirm(&self, message: &str, default: bool) -> Result<Selection<bool>>;
}

/// `dialoguer` prompts on the controlling terminal. Escape cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    async fn select(&self, message: &str, items: &[String]) -> Result<Selection<usize>> {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()?;
        Ok(choice.into())
    }

    async fn multi_select(&self, message: &str, items: &[String]) -> Result<Selection<Vec<usize>>> {
        let choice = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(items)
            .interact_opt()?;
        Ok(choice.into())
    }

    async fn input(&self, message: &str, default: Option<&str>) -> Result<Selection<String>> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme).with_prompt(message).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(Selection::Selected(input.interact_text()?))
    }

    async fn confirm(&self, message: &str, default: bool) -> Result<Selection<bool>> {
        let choice = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(default)
            .interact_opt()?;
        Ok(choice.into())
    }
}
