use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{DownloadRequest, OpResult};

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<DownloadRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    let result = if req.resource_id.trim().is_empty() || req.language.trim().is_empty() {
        OpResult::err("resource id and language are required")
    } else {
        match state
            .orchestrator
            .download(&req.resource_id, &req.language)
            .await
        {
            Ok(msg) => OpResult::ok(msg),
            Err(e) => OpResult::err(e),
        }
    };
    HttpResponse::Ok().json(result)
}
