//! Shared application state injected into every Actix handler.

use crate::activity_log::ActivityLog;
use crate::config_store::ConfigStore;
use crate::detector::ChangeDetector;
use crate::orchestrator::SyncOrchestrator;
use crate::platform::TranslationPlatform;
use std::sync::Arc;

/// Built once in `main` and cloned into the Actix app data. Components
/// receive their dependencies here instead of through globals, so tests
/// assemble the same struct over an in-memory store and fake clients.
#[derive(Clone)]
pub struct AppState {
    pub store: ConfigStore,
    pub log: ActivityLog,
    pub detector: ChangeDetector,
    pub orchestrator: SyncOrchestrator,
    pub platform: Arc<dyn TranslationPlatform>,
}
