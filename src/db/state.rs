use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

const SCHEMA_STATE: &str = "CREATE TABLE IF NOT EXISTS state (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const UPSERT_STATE: &str = "INSERT INTO state (key, value) VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP";
const SELECT_STATE: &str = "SELECT value FROM state WHERE key = ?1";
const DELETE_STATE: &str = "DELETE FROM state WHERE key = ?1";

/// Persisted keys shared with the editor extension.
pub mod keys {
    pub const IS_TRACKING: &str = "tracking:isTracking";
    pub const WORKSPACE_ID: &str = "tracking:workspaceId";
    pub const PROJECT_ID: &str = "tracking:projectId";
    pub const TASK_ID: &str = "tracking:taskId";
    pub const DESCRIPTION: &str = "tracking:description";
    pub const BILLABLE: &str = "tracking:billable";
    pub const TAG_IDS: &str = "tracking:tagIds";

    pub const SELECTED_WORKSPACE: &str = "selectedWorkspace";
    pub const SELECTED_PROJECT: &str = "selectedProject";
    /// Workspace of the last successfully started entry.
    pub const LAST_WORKSPACE_ID: &str = "workspaceId";

    pub const TRACKING: [&str; 7] = [IS_TRACKING, WORKSPACE_ID, PROJECT_ID, TASK_ID, DESCRIPTION, BILLABLE, TAG_IDS];
}

/// Key-value store surviving across sessions. Values are JSON documents.
pub struct State {
    conn: Connection,
}

impl State {
    pub fn new() -> Result<Self> {
        Self::with_db(Db::new()?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_db(Db::in_memory()?)
    }

    fn with_db(db: Db) -> Result<Self> {
        db.conn.execute(SCHEMA_STATE, [])?;
        Ok(Self { conn: db.conn })
    }

    /// Returns `None` when the key was never written (or was removed).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw: Option<String> = self.conn.query_row(SELECT_STATE, params![key], |row| row.get(0)).optional()?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.conn.execute(UPSERT_STATE, params![key, serde_json::to_string(value)?])?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute(DELETE_STATE, params![key])?;
        Ok(())
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.conn.query_row(SELECT_STATE, params![key], |_| Ok(())).optional()?.is_some())
    }

    pub fn is_tracking(&self) -> Result<bool> {
        Ok(self.get::<bool>(keys::IS_TRACKING)?.unwrap_or(false))
    }
}
