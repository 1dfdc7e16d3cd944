//! Change detection over the configured source folders.
//!
//! Each tick lists every folder's documents, diffs them against the known
//! file mappings and classifies each document as new (no mapping yet) or
//! updated (mapping exists, modification time differs). New documents get
//! a pending mapping, batch-persisted in one write; updated documents that
//! already have a remote resource are handed to the upload workflow.
//!
//! A scan failure on one folder never aborts the others.

use crate::activity_log::ActivityLog;
use crate::config_store::ConfigStore;
use crate::orchestrator::SyncOrchestrator;
use crate::workspace::{DiscoveredFile, DocumentWorkspace};
use chrono::Utc;
use common::model::config::SyncConfig;
use common::model::file_mapping::FileMapping;
use common::model::folder::{DocFormat, FolderMapping};
use log::{info, warn};
use std::sync::Arc;

/// A document seen for the first time, with the folder that owns it.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub folder_id: String,
    pub file: DiscoveredFile,
}

/// A known document whose modification time changed since the last sync.
/// Carries the mapping's resource id forward so the upload path does not
/// have to re-resolve it.
#[derive(Debug, Clone)]
pub struct UpdatedFile {
    pub file_id: String,
    pub file_name: String,
    pub resource_id: Option<String>,
    pub last_modified: String,
}

#[derive(Debug, Default)]
pub struct DetectedChanges {
    pub new_files: Vec<NewFile>,
    pub updated_files: Vec<UpdatedFile>,
}

#[derive(Clone)]
pub struct ChangeDetector {
    store: ConfigStore,
    log: ActivityLog,
    workspace: Arc<dyn DocumentWorkspace>,
}

impl ChangeDetector {
    pub fn new(store: ConfigStore, log: ActivityLog, workspace: Arc<dyn DocumentWorkspace>) -> Self {
        Self {
            store,
            log,
            workspace,
        }
    }

    /// Lists a folder's documents, keeping only the formats it opted into.
    pub async fn scan(&self, folder: &FolderMapping) -> Result<Vec<DiscoveredFile>, String> {
        let documents = self.workspace.list_documents(&folder.source_location).await?;
        Ok(documents
            .into_iter()
            .filter(|d| {
                DocFormat::from_mime(&d.mime_type)
                    .is_some_and(|f| folder.formats.contains(&f))
            })
            .collect())
    }

    /// Diffs every folder's scan output against the known file mappings.
    pub async fn detect_changes(&self, config: &SyncConfig) -> DetectedChanges {
        let mut changes = DetectedChanges::default();

        for folder in &config.folders {
            let discovered = match self.scan(folder).await {
                Ok(d) => d,
                Err(e) => {
                    warn!("scan of folder '{}' failed: {}", folder.name, e);
                    self.log
                        .append(&format!("Scan of folder '{}' failed: {}", folder.name, e));
                    continue;
                }
            };

            for file in discovered {
                let known = config
                    .file_mappings
                    .iter()
                    .find(|m| m.folder_id == folder.id && m.file_id == file.file_id);
                match known {
                    None => changes.new_files.push(NewFile {
                        folder_id: folder.id.clone(),
                        file,
                    }),
                    Some(mapping) if mapping.last_modified != file.last_modified => {
                        changes.updated_files.push(UpdatedFile {
                            file_id: mapping.file_id.clone(),
                            file_name: mapping.file_name.clone(),
                            resource_id: mapping.resource_id.clone(),
                            last_modified: file.last_modified.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        changes
    }

    /// Creates pending mappings for newly discovered documents, persisted
    /// as one batch write.
    pub fn process_new_files(&self, new_files: &[NewFile]) {
        if new_files.is_empty() {
            return;
        }

        let now = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let mut config = self.store.read();
        for nf in new_files {
            // A mapping may have appeared since detection; keep the first.
            if config.mapping(&nf.file.file_id).is_some() {
                continue;
            }
            config.file_mappings.push(FileMapping {
                file_id: nf.file.file_id.clone(),
                file_name: nf.file.file_name.clone(),
                folder_id: nf.folder_id.clone(),
                resource_id: None,
                last_modified: nf.file.last_modified.clone(),
                mime_type: nf.file.mime_type.clone(),
                size: nf.file.size,
                url: nf.file.url.clone(),
                date_added: now.clone(),
                date_mapped: None,
            });
            self.log
                .append(&format!("Discovered new document '{}'", nf.file.file_name));
        }

        if let Err(e) = self.store.write(&config) {
            warn!("could not persist new file mappings: {}", e);
        }
    }

    /// Re-uploads updated documents that are mapped to a remote resource;
    /// pending documents are skipped and noted.
    pub async fn process_updated_files(
        &self,
        updated_files: &[UpdatedFile],
        orchestrator: &SyncOrchestrator,
    ) {
        for uf in updated_files {
            match uf.resource_id.as_deref().filter(|r| !r.is_empty()) {
                Some(resource_id) => {
                    info!("'{}' changed, re-uploading", uf.file_name);
                    if let Err(e) = orchestrator.upload(&uf.file_id, resource_id).await {
                        warn!("re-upload of '{}' failed: {}", uf.file_name, e);
                    }
                }
                None => {
                    self.log.append(&format!(
                        "'{}' changed but has no resource assigned, skipping",
                        uf.file_name
                    ));
                }
            }
        }
    }

    /// One full detection pass: scan, persist new, upload updated.
    pub async fn run_once(&self, orchestrator: &SyncOrchestrator) {
        let config = self.store.read();
        if config.folders.is_empty() {
            return;
        }
        let changes = self.detect_changes(&config).await;
        info!(
            "change detection found {} new, {} updated",
            changes.new_files.len(),
            changes.updated_files.len()
        );
        self.process_new_files(&changes.new_files);
        self.process_updated_files(&changes.updated_files, orchestrator)
            .await;
    }
}
