use crate::config_store::ConfigStore;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::requests::{AssignRequest, OpResult};

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<AssignRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    let result = match assign_resource(&state.store, &req.file_id, &req.resource_id) {
        Ok(file_name) => {
            state.log.append(&format!(
                "Mapped '{}' to resource '{}'",
                file_name, req.resource_id
            ));
            OpResult::ok(format!("'{}' mapped", file_name))
        }
        Err(e) => OpResult::err(e),
    };
    HttpResponse::Ok().json(result)
}

/// The resource id is set exactly once: only a pending mapping accepts it.
fn assign_resource(
    store: &ConfigStore,
    file_id: &str,
    resource_id: &str,
) -> Result<String, String> {
    if resource_id.trim().is_empty() {
        return Err("resource id must not be empty".to_string());
    }

    let mut config = store.read();
    let Some(mapping) = config.mapping_mut(file_id) else {
        return Err(format!("no pending file mapping for '{}'", file_id));
    };
    if !mapping.is_pending() {
        return Err(format!(
            "'{}' is already mapped to '{}'",
            mapping.file_name,
            mapping.resource_id.as_deref().unwrap_or_default()
        ));
    }

    mapping.resource_id = Some(resource_id.to_string());
    mapping.date_mapped = Some(Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true));
    let file_name = mapping.file_name.clone();
    store.write(&config)?;
    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mapping, folder};
    use common::model::config::SyncConfig;
    use common::model::folder::Trigger;

    fn store_with_pending() -> ConfigStore {
        let store = ConfigStore::open_in_memory().unwrap();
        let mut config = SyncConfig::default();
        config
            .folders
            .push(folder("f1", "loc-src", "loc-out", vec![Trigger::Translated]));
        config.file_mappings.push(mapping("file-1", "f1", None));
        store.write(&config).unwrap();
        store
    }

    #[test]
    fn assigns_resource_to_pending_mapping() {
        let store = store_with_pending();
        assign_resource(&store, "file-1", "o:acme:p:docs:r:guide").unwrap();
        let mapping = store.read().mapping("file-1").cloned().unwrap();
        assert_eq!(mapping.resource_id.as_deref(), Some("o:acme:p:docs:r:guide"));
        assert!(mapping.date_mapped.is_some());
    }

    #[test]
    fn unknown_file_id_fails_without_mutation() {
        let store = store_with_pending();
        let before = serde_json::to_string(&store.read()).unwrap();
        assert!(assign_resource(&store, "ghost", "r:x").is_err());
        let after = serde_json::to_string(&store.read()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn already_mapped_file_is_rejected() {
        let store = store_with_pending();
        assign_resource(&store, "file-1", "r:first").unwrap();
        let err = assign_resource(&store, "file-1", "r:second").unwrap_err();
        assert!(err.contains("already mapped"));
        assert_eq!(
            store.read().mapping("file-1").unwrap().resource_id.as_deref(),
            Some("r:first")
        );
    }

    #[test]
    fn empty_resource_id_is_rejected() {
        let store = store_with_pending();
        assert!(assign_resource(&store, "file-1", "  ").is_err());
        assert!(store.read().mapping("file-1").unwrap().is_pending());
    }
}
