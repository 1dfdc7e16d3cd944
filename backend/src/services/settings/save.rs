use crate::config_store::ConfigStore;
use crate::services::settings::MASKED_SECRET;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::config::SyncConfig;
use common::requests::OpResult;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SyncConfig>,
) -> impl Responder {
    let result = match save_config(&state.store, payload.into_inner()) {
        Ok(()) => {
            state.log.append("Configuration saved");
            OpResult::ok("Configuration saved")
        }
        Err(e) => OpResult::err(e),
    };
    HttpResponse::Ok().json(result)
}

fn save_config(store: &ConfigStore, mut incoming: SyncConfig) -> Result<(), String> {
    if incoming.settings.api_token.trim().is_empty() {
        return Err("API token must not be empty".to_string());
    }
    for folder in &incoming.folders {
        folder.validate()?;
    }

    // The masked placeholder coming back unchanged means "keep the stored
    // secret"; anything else replaces it.
    let stored = store.read();
    if incoming.settings.api_token == MASKED_SECRET {
        incoming.settings.api_token = stored.settings.api_token.clone();
    }
    if incoming.settings.webhook_secret.as_deref() == Some(MASKED_SECRET) {
        incoming.settings.webhook_secret = stored.settings.webhook_secret.clone();
    }

    store.write(&incoming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::folder;
    use common::model::folder::Trigger;

    fn valid_config() -> SyncConfig {
        let mut config = SyncConfig::default();
        config.settings.api_token = "tok".to_string();
        config
            .folders
            .push(folder("f1", "loc-src", "loc-out", vec![Trigger::Translated]));
        config
    }

    #[test]
    fn masked_placeholder_preserves_stored_secrets() {
        let store = ConfigStore::open_in_memory().unwrap();
        let mut original = valid_config();
        original.settings.api_token = "real-token".to_string();
        original.settings.webhook_secret = Some("real-secret".to_string());
        store.write(&original).unwrap();

        let mut resubmitted = valid_config();
        resubmitted.settings.api_token = MASKED_SECRET.to_string();
        resubmitted.settings.webhook_secret = Some(MASKED_SECRET.to_string());
        save_config(&store, resubmitted).unwrap();

        let saved = store.read();
        assert_eq!(saved.settings.api_token, "real-token");
        assert_eq!(saved.settings.webhook_secret.as_deref(), Some("real-secret"));
    }

    #[test]
    fn fresh_secret_replaces_stored_value() {
        let store = ConfigStore::open_in_memory().unwrap();
        let mut original = valid_config();
        original.settings.api_token = "old-token".to_string();
        store.write(&original).unwrap();

        let mut resubmitted = valid_config();
        resubmitted.settings.api_token = "new-token".to_string();
        save_config(&store, resubmitted).unwrap();

        assert_eq!(store.read().settings.api_token, "new-token");
    }

    #[test]
    fn folder_without_triggers_is_rejected() {
        let store = ConfigStore::open_in_memory().unwrap();
        let mut config = valid_config();
        config.folders[0].triggers.clear();
        assert!(save_config(&store, config).is_err());
        // Nothing persisted.
        assert!(store.read().folders.is_empty());
    }

    #[test]
    fn missing_token_is_rejected() {
        let store = ConfigStore::open_in_memory().unwrap();
        let mut config = valid_config();
        config.settings.api_token = "  ".to_string();
        assert!(save_config(&store, config).is_err());
    }
}
