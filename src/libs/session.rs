//! The tracking session and its persisted form.
//!
//! Every field lives under its own `tracking:*` key and is written as soon as
//! it is chosen, so a flow interrupted half-way (say, after the workspace was
//! stored but before `tracking:isTracking`) can be resumed by prompting only
//! for the keys that are still missing.
//!
//! Optional ids are stored as JSON `null` when the user explicitly picked
//! "none"; an absent key means "never chosen".

use crate::api::TimeEntryRequest;
use crate::db::state::{keys, State};
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Fields as found in persisted state; `None` means the key is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredSession {
    pub is_tracking: bool,
    pub workspace_id: Option<String>,
    pub project_id: Option<Option<String>>,
    pub task_id: Option<Option<String>>,
    pub description: Option<String>,
    pub billable: Option<bool>,
    pub tag_ids: Option<Vec<String>>,
}

impl StoredSession {
    pub fn load(state: &State) -> Result<Self> {
        Ok(Self {
            is_tracking: state.is_tracking()?,
            workspace_id: state.get::<String>(keys::WORKSPACE_ID)?.filter(|id| !id.is_empty()),
            project_id: state.get(keys::PROJECT_ID)?,
            task_id: state.get(keys::TASK_ID)?,
            description: state.get(keys::DESCRIPTION)?,
            billable: state.get(keys::BILLABLE)?,
            tag_ids: state.get(keys::TAG_IDS)?,
        })
    }

    /// The complete session, if every field is present.
    pub fn complete(&self) -> Option<TrackingSession> {
        Some(TrackingSession {
            is_tracking: self.is_tracking,
            workspace_id: self.workspace_id.clone()?,
            project_id: self.project_id.clone()?,
            task_id: self.task_id.clone()?,
            description: self.description.clone()?,
            billable: self.billable?,
            tag_ids: self.tag_ids.clone()?,
        })
    }
}

/// A fully resolved session. Holding one guarantees a workspace id.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSession {
    pub is_tracking: bool,
    pub workspace_id: String,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub description: String,
    pub billable: bool,
    pub tag_ids: Vec<String>,
}

impl TrackingSession {
    /// Writes every field, then the tracking flag last.
    pub fn persist(&self, state: &State) -> Result<()> {
        state.set(keys::WORKSPACE_ID, &self.workspace_id)?;
        state.set(keys::PROJECT_ID, &self.project_id)?;
        state.set(keys::TASK_ID, &self.task_id)?;
        state.set(keys::DESCRIPTION, &self.description)?;
        state.set(keys::BILLABLE, &self.billable)?;
        state.set(keys::TAG_IDS, &self.tag_ids)?;
        state.set(keys::IS_TRACKING, &self.is_tracking)?;
        Ok(())
    }

    pub fn time_entry(&self, start: DateTime<Utc>) -> TimeEntryRequest {
        TimeEntryRequest {
            start,
            end: None,
            billable: self.billable,
            description: self.description.clone(),
            project_id: self.project_id.clone(),
            task_id: self.task_id.clone(),
            tag_ids: self.tag_ids.clone(),
        }
    }
}

pub fn set_tracking(state: &State, tracking: bool) -> Result<()> {
    state.set(keys::IS_TRACKING, &tracking)
}

/// Removes every `tracking:*` key.
pub fn clear(state: &State) -> Result<()> {
    for key in keys::TRACKING {
        state.remove(key)?;
    }
    Ok(())
}

/// Removes the session fields but leaves the tracking flag alone.
pub fn clear_fields(state: &State) -> Result<()> {
    for key in keys::TRACKING.iter().filter(|key| **key != keys::IS_TRACKING) {
        state.remove(key)?;
    }
    Ok(())
}
