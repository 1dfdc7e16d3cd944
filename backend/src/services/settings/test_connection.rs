use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::OpResult;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let result = match state.platform.test_connection().await {
        Ok(()) => OpResult::ok("Connection successful"),
        Err(e) => OpResult::err(e.to_string()),
    };
    HttpResponse::Ok().json(result)
}
