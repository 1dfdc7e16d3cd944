use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (organization, project) = path.into_inner();
    match state.platform.project_languages(&organization, &project).await {
        Ok(languages) => HttpResponse::Ok().json(languages),
        Err(e) => HttpResponse::BadGateway().body(e.to_string()),
    }
}
