//! Timer driving periodic change detection.
//!
//! Spawned once from `main` as a long-running task. The interval is
//! re-read from the store before every tick, so a settings change takes
//! effect without a restart. Each tick is one independent invocation;
//! everything it does is caught and logged inside `run_once`, so the loop
//! itself never exits.

use crate::config_store::ConfigStore;
use crate::detector::ChangeDetector;
use crate::orchestrator::SyncOrchestrator;
use log::debug;
use std::time::Duration;
use tokio::time::sleep;

pub async fn run_scan_loop(
    store: ConfigStore,
    detector: ChangeDetector,
    orchestrator: SyncOrchestrator,
) {
    loop {
        let minutes = store.read().settings.check_interval_minutes.max(1);
        sleep(Duration::from_secs(minutes * 60)).await;
        debug!("scheduled change detection tick");
        detector.run_once(&orchestrator).await;
    }
}
