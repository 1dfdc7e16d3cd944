use crate::signing;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::webhook::{WebhookEvent, WebhookPayload};
use log::{debug, warn};

/// Signature of the delivery, base64 HMAC-SHA256 over the canonical string.
const SIGNATURE_HEADER: &str = "x-webhook-signature";
/// The URL the platform believes it delivered to; part of the signed string.
const URL_HEADER: &str = "x-webhook-url";
const DATE_HEADER: &str = "date";

pub(crate) async fn process(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> impl Responder {
    let config = state.store.read();

    let secret = config
        .settings
        .webhook_secret
        .clone()
        .filter(|s| !s.is_empty());
    match secret {
        Some(secret) => {
            let verified = signing::verify_webhook(
                &secret,
                header(&req, SIGNATURE_HEADER).as_deref(),
                header(&req, URL_HEADER).as_deref(),
                header(&req, DATE_HEADER).as_deref(),
                &body,
            );
            if !verified {
                state
                    .log
                    .append("Webhook rejected: signature verification failed");
                return HttpResponse::Unauthorized().body("invalid signature");
            }
        }
        // No secret configured: accept unsigned deliveries, owner's choice.
        None => debug!("no webhook secret configured, skipping signature check"),
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!("malformed webhook payload: {}", e);
            return HttpResponse::BadRequest().body("malformed payload");
        }
    };

    // The platform expects a prompt acknowledgement; a triggered download
    // polls for minutes, so routing continues in the background.
    let state = state.into_inner();
    tokio::spawn(async move {
        route_event(&state, payload).await;
    });
    HttpResponse::Ok().body("accepted")
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Resolves an event to a configured document and starts the download
/// workflow when the folder opted into the event's trigger. Every dead end
/// is a logged no-op; nothing escapes a webhook invocation.
pub(crate) async fn route_event(state: &AppState, payload: WebhookPayload) {
    let Some(event) = WebhookEvent::parse(&payload.event) else {
        state
            .log
            .append(&format!("Ignoring unrecognized webhook event '{}'", payload.event));
        return;
    };

    let config = state.store.read();
    let Some(mapping) = config.mapping_by_resource(&payload.resource) else {
        state.log.append(&format!(
            "Webhook for resource '{}' matches no mapped document",
            payload.resource
        ));
        return;
    };
    let Some(folder) = config.folder(&mapping.folder_id) else {
        state.log.append(&format!(
            "Webhook for '{}' skipped, its folder mapping no longer exists",
            mapping.file_name
        ));
        return;
    };

    let trigger = event.trigger();
    if !folder.triggers.contains(&trigger) {
        state.log.append(&format!(
            "Event '{}' for '{}' ignored, folder '{}' does not trigger on it",
            payload.event, mapping.file_name, folder.name
        ));
        return;
    }

    if let Err(e) = state
        .orchestrator
        .download(&payload.resource, &payload.language)
        .await
    {
        warn!("webhook-triggered download failed: {}", e);
    }
}
