use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::config::SyncConfig;
use common::requests::FileStatusCounts;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(counts(&state.store.read()))
}

fn counts(config: &SyncConfig) -> FileStatusCounts {
    let pending = config.file_mappings.iter().filter(|m| m.is_pending()).count();
    FileStatusCounts {
        total: config.file_mappings.len(),
        pending,
        mapped: config.file_mappings.len() - pending,
    }
}
