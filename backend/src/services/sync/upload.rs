use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{OpResult, UploadRequest};

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<UploadRequest>,
) -> impl Responder {
    HttpResponse::Ok().json(trigger_upload(&state, &payload.file_id).await)
}

async fn trigger_upload(state: &AppState, file_id: &str) -> OpResult {
    let config = state.store.read();
    let Some(mapping) = config.mapping(file_id) else {
        return OpResult::err(format!("no file mapping for '{}'", file_id));
    };
    let Some(resource_id) = mapping.resource_id.clone().filter(|r| !r.is_empty()) else {
        return OpResult::err(format!(
            "'{}' has no resource assigned yet",
            mapping.file_name
        ));
    };

    match state.orchestrator.upload(file_id, &resource_id).await {
        Ok(msg) => OpResult::ok(msg),
        Err(e) => OpResult::err(e),
    }
}
