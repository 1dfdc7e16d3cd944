mod activity_log;
mod config_store;
mod detector;
mod orchestrator;
mod platform;
mod scheduler;
mod services;
mod signing;
mod state;
#[cfg(test)]
mod testing;
mod workspace;

use crate::activity_log::ActivityLog;
use crate::config_store::ConfigStore;
use crate::detector::ChangeDetector;
use crate::orchestrator::{PollPolicy, SyncOrchestrator};
use crate::platform::ApiClient;
use crate::state::AppState;
use crate::workspace::WorkspaceClient;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::env;
use std::sync::Arc;

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let host = env_or("HOST", "0.0.0.0");
    let port: u16 = env_or("PORT", "8080").parse().unwrap_or(8080);
    let db_path = env_or("DOCSYNC_DB", "docsync.sqlite");
    let platform_url = env_or("PLATFORM_API_URL", "https://rest.api.translations.example");
    let workspace_url = env_or("WORKSPACE_API_URL", "https://workspace.api.example");
    let workspace_token = env_or("WORKSPACE_API_TOKEN", "");

    let store = ConfigStore::open(&db_path).map_err(std::io::Error::other)?;
    let log = ActivityLog::new(store.clone());
    let platform: Arc<dyn platform::TranslationPlatform> = Arc::new(
        ApiClient::new(&platform_url, store.clone()).map_err(|e| std::io::Error::other(e.to_string()))?,
    );
    let workspace: Arc<dyn workspace::DocumentWorkspace> = Arc::new(
        WorkspaceClient::new(&workspace_url, &workspace_token).map_err(std::io::Error::other)?,
    );

    let orchestrator = SyncOrchestrator::new(
        store.clone(),
        log.clone(),
        platform.clone(),
        workspace.clone(),
        PollPolicy::default(),
    );
    let detector = ChangeDetector::new(store.clone(), log.clone(), workspace.clone());

    // Periodic change detection runs for the life of the process.
    tokio::spawn(scheduler::run_scan_loop(
        store.clone(),
        detector.clone(),
        orchestrator.clone(),
    ));

    let app_state = AppState {
        store,
        log,
        detector,
        orchestrator,
        platform,
    };

    info!("sync service listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(app_state.clone()))
            .service(services::settings::configure_routes())
            .service(services::sync::configure_routes())
            .service(services::mappings::configure_routes())
            .service(services::activity::configure_routes())
            .service(services::webhook::configure_routes())
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
