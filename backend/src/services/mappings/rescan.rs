use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::OpResult;

/// Kicks off a detection pass in the background; uploads triggered by it
/// can take minutes, so the response does not wait for them.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let detector = state.detector.clone();
    let orchestrator = state.orchestrator.clone();
    state.log.append("Manual rescan requested");
    tokio::spawn(async move {
        detector.run_once(&orchestrator).await;
    });
    HttpResponse::Ok().json(OpResult::ok("Rescan started"))
}
