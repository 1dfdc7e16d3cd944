//! Append-only, capped, newest-first audit trail.
//!
//! Every component logs its user-visible outcomes here; the UI reads it
//! back verbatim. `append` never returns an error: if persistence fails
//! the entry goes to the process log instead and the invocation carries on.

use crate::config_store::ConfigStore;
use chrono::Utc;
use log::error;

const LOG_KEY: &str = "activity_log";
const MAX_ENTRIES: usize = 100;

#[derive(Clone)]
pub struct ActivityLog {
    store: ConfigStore,
}

impl ActivityLog {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Prepends `"{ISO-timestamp}: {message}"` and evicts beyond 100
    /// entries.
    pub fn append(&self, message: &str) {
        let stamp = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let entry = format!("{}: {}", stamp, message);

        let mut entries = self.entries();
        entries.insert(0, entry);
        entries.truncate(MAX_ENTRIES);

        let raw = match serde_json::to_string(&entries) {
            Ok(raw) => raw,
            Err(e) => {
                error!("activity log serialization failed: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.put(LOG_KEY, &raw) {
            error!("activity log write failed: {}", e);
        }
    }

    /// Newest-first entries; a missing or malformed log reads as empty.
    pub fn entries(&self) -> Vec<String> {
        self.store
            .get(LOG_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.delete(LOG_KEY) {
            error!("activity log clear failed: {}", e);
        }
    }
}
