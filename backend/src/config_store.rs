//! Durable key/value persistence for the configuration blob and the
//! activity log.
//!
//! One sqlite table (`kv`) holds everything: the whole `SyncConfig` as JSON
//! under the `config` key, and the activity log array under its own key.
//! There is no locking or versioning across invocations beyond sqlite's own
//! serialization: two invocations racing to update the blob overwrite each
//! other and the last write wins. Acceptable for the owner-only usage
//! pattern this service is built for.
//!
//! Reads are fail-soft: a missing or malformed blob deserializes to the
//! default empty configuration and is logged, never surfaced to the caller.

use common::model::config::SyncConfig;
use common::model::file_mapping::FileMapping;
use common::model::folder::FolderMapping;
use common::model::settings::Settings;
use log::{error, warn};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

const CONFIG_KEY: &str = "config";

/// Handle to the persistent store. Cheap to clone; every component holds
/// its own clone instead of reaching for ambient global state, so tests can
/// construct one over an in-memory database.
#[derive(Clone)]
pub struct ConfigStore {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigStore {
    pub fn open(path: &str) -> Result<Self, String> {
        let conn = Connection::open(path).map_err(|e| e.to_string())?;
        Self::init(conn)
    }

    /// In-memory store for tests; contents live as long as the handle.
    pub fn open_in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory().map_err(|e| e.to_string())?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, String> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(|e| e.to_string())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Raw read of one key. Storage errors are logged and read as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        match conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(value) => Some(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => {
                error!("config store read of '{}' failed: {}", key, e);
                None
            }
        }
    }

    pub fn put(&self, key: &str, value: &str) -> Result<(), String> {
        let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<(), String> {
        let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Reads the whole configuration. Never fails: garbage in the blob is
    /// treated as an empty configuration so one bad write cannot brick the
    /// service.
    pub fn read(&self) -> SyncConfig {
        match self.get(CONFIG_KEY) {
            None => SyncConfig::default(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!("persisted config is malformed, treating as empty: {}", e);
                    SyncConfig::default()
                }
            },
        }
    }

    pub fn write(&self, config: &SyncConfig) -> Result<(), String> {
        let raw = serde_json::to_string(config).map_err(|e| e.to_string())?;
        self.put(CONFIG_KEY, &raw)
    }

    // Section updates are read-modify-write on the whole blob.

    pub fn update_settings(&self, settings: Settings) -> Result<(), String> {
        let mut config = self.read();
        config.settings = settings;
        self.write(&config)
    }

    pub fn update_folders(&self, folders: Vec<FolderMapping>) -> Result<(), String> {
        let mut config = self.read();
        config.folders = folders;
        self.write(&config)
    }

    pub fn update_file_mappings(&self, mappings: Vec<FileMapping>) -> Result<(), String> {
        let mut config = self.read();
        config.file_mappings = mappings;
        self.write(&config)
    }
}
