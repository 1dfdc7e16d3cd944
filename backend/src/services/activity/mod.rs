//! # Activity Service Module
//!
//! Read-only exposure of the activity log under `/api/activity`, plus the
//! owner's clear operation.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/activity`**: newest-first log entries as a JSON array.
//! *   **`POST /api/activity/clear`**: deletes the log.

use crate::state::AppState;
use actix_web::web::{self, get, post, scope};
use actix_web::{HttpResponse, Responder, Scope};
use common::requests::OpResult;

const API_PATH: &str = "/api/activity";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(entries))
        .route("/clear", post().to(clear))
}

async fn entries(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.log.entries())
}

async fn clear(state: web::Data<AppState>) -> impl Responder {
    state.log.clear();
    HttpResponse::Ok().json(OpResult::ok("Activity log cleared"))
}
