use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "clockin.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let conn = Connection::open(db_file_path)?;
        Ok(Db { conn })
    }

    /// Private database that disappears with the connection.
    pub fn in_memory() -> Result<Db> {
        Ok(Db {
            conn: Connection::open_in_memory()?,
        })
    }
}
