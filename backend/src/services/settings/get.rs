use crate::services::settings::MASKED_SECRET;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::config::SyncConfig;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(masked(state.store.read()))
}

/// Secrets never leave the service; the UI only ever sees the placeholder.
fn masked(mut config: SyncConfig) -> SyncConfig {
    if !config.settings.api_token.is_empty() {
        config.settings.api_token = MASKED_SECRET.to_string();
    }
    if config
        .settings
        .webhook_secret
        .as_deref()
        .is_some_and(|s| !s.is_empty())
    {
        config.settings.webhook_secret = Some(MASKED_SECRET.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_masked() {
        let mut config = SyncConfig::default();
        config.settings.api_token = "real-token".to_string();
        config.settings.webhook_secret = Some("real-secret".to_string());
        let out = masked(config);
        assert_eq!(out.settings.api_token, MASKED_SECRET);
        assert_eq!(out.settings.webhook_secret.as_deref(), Some(MASKED_SECRET));
    }

    #[test]
    fn empty_secrets_stay_empty() {
        let out = masked(SyncConfig::default());
        assert!(out.settings.api_token.is_empty());
        assert!(out.settings.webhook_secret.is_none());
    }
}
