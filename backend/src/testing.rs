//! Shared test doubles: scriptable in-memory implementations of the two
//! external-system clients, plus configuration builders.

use crate::platform::{ApiError, DownloadPoll, TranslationPlatform, UploadPoll};
use crate::workspace::{DiscoveredFile, DocumentWorkspace};
use async_trait::async_trait;
use common::jobs::JobStatus;
use common::model::config::SyncConfig;
use common::model::file_mapping::FileMapping;
use common::model::folder::{DocFormat, FolderMapping, Trigger};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Minimal valid interchange-archive bytes (the `PK` signature and filler).
pub const ZIP: &[u8] = b"PK\x03\x04fake-archive-bytes";

pub struct FakePlatform {
    upload_script: Mutex<VecDeque<Result<UploadPoll, ApiError>>>,
    download_script: Mutex<VecDeque<Result<DownloadPoll, ApiError>>>,
    upload_polls: AtomicU32,
    download_polls: AtomicU32,
    submitted_uploads: Mutex<Vec<(String, Vec<u8>)>>,
    submitted_downloads: Mutex<Vec<(String, String)>>,
    content: Mutex<Vec<u8>>,
    pub connection_ok: std::sync::atomic::AtomicBool,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            upload_script: Mutex::new(VecDeque::new()),
            download_script: Mutex::new(VecDeque::new()),
            upload_polls: AtomicU32::new(0),
            download_polls: AtomicU32::new(0),
            submitted_uploads: Mutex::new(Vec::new()),
            submitted_downloads: Mutex::new(Vec::new()),
            content: Mutex::new(Vec::new()),
            connection_ok: std::sync::atomic::AtomicBool::new(true),
        }
    }
}

impl FakePlatform {
    /// Queue upload poll results; once exhausted the job reports
    /// `processing` forever.
    pub fn script_upload(&self, polls: Vec<Result<UploadPoll, ApiError>>) {
        *self.upload_script.lock().unwrap() = polls.into();
    }

    /// Queue download poll results; once exhausted the job stays pending.
    pub fn script_download(&self, polls: Vec<Result<DownloadPoll, ApiError>>) {
        *self.download_script.lock().unwrap() = polls.into();
    }

    pub fn set_content(&self, bytes: Vec<u8>) {
        *self.content.lock().unwrap() = bytes;
    }

    pub fn upload_poll_count(&self) -> u32 {
        self.upload_polls.load(Ordering::SeqCst)
    }

    pub fn download_poll_count(&self) -> u32 {
        self.download_polls.load(Ordering::SeqCst)
    }

    pub fn submitted_uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.submitted_uploads.lock().unwrap().clone()
    }

    pub fn submitted_downloads(&self) -> Vec<(String, String)> {
        self.submitted_downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationPlatform for FakePlatform {
    async fn test_connection(&self) -> Result<(), ApiError> {
        if self.connection_ok.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ApiError::Auth("invalid API token".to_string()))
        }
    }

    async fn submit_upload(&self, resource_id: &str, content: &[u8]) -> Result<String, ApiError> {
        self.submitted_uploads
            .lock()
            .unwrap()
            .push((resource_id.to_string(), content.to_vec()));
        Ok("upload-job-1".to_string())
    }

    async fn upload_status(&self, _job_id: &str) -> Result<UploadPoll, ApiError> {
        self.upload_polls.fetch_add(1, Ordering::SeqCst);
        self.upload_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(UploadPoll {
                status: JobStatus::Processing,
                details: None,
            }))
    }

    async fn submit_download(
        &self,
        resource_id: &str,
        language: &str,
    ) -> Result<String, ApiError> {
        self.submitted_downloads
            .lock()
            .unwrap()
            .push((resource_id.to_string(), language.to_string()));
        Ok("download-job-1".to_string())
    }

    async fn download_status(&self, _job_id: &str) -> Result<DownloadPoll, ApiError> {
        self.download_polls.fetch_add(1, Ordering::SeqCst);
        self.download_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(DownloadPoll::Pending))
    }

    async fn fetch_content(&self, _url: &str) -> Result<Vec<u8>, ApiError> {
        Ok(self.content.lock().unwrap().clone())
    }

    async fn project_languages(
        &self,
        _organization: &str,
        _project: &str,
    ) -> Result<Vec<String>, ApiError> {
        Ok(vec!["es".to_string(), "de".to_string()])
    }
}

#[derive(Default)]
pub struct FakeWorkspace {
    documents: Mutex<HashMap<String, Vec<DiscoveredFile>>>,
    failing_locations: Mutex<HashSet<String>>,
    exports: Mutex<HashMap<String, Vec<u8>>>,
    modified_times: Mutex<HashMap<String, String>>,
    imports: Mutex<Vec<(String, String, DocFormat, Vec<u8>)>>,
}

impl FakeWorkspace {
    pub fn add_document(&self, location: &str, file: DiscoveredFile) {
        self.documents
            .lock()
            .unwrap()
            .entry(location.to_string())
            .or_default()
            .push(file);
    }

    /// Make `list_documents` fail for one location, for partial-failure
    /// isolation tests.
    pub fn fail_location(&self, location: &str) {
        self.failing_locations
            .lock()
            .unwrap()
            .insert(location.to_string());
    }

    pub fn set_export(&self, file_id: &str, bytes: Vec<u8>) {
        self.exports
            .lock()
            .unwrap()
            .insert(file_id.to_string(), bytes);
    }

    pub fn set_modified_time(&self, file_id: &str, time: &str) {
        self.modified_times
            .lock()
            .unwrap()
            .insert(file_id.to_string(), time.to_string());
    }

    pub fn imports(&self) -> Vec<(String, String, DocFormat, Vec<u8>)> {
        self.imports.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentWorkspace for FakeWorkspace {
    async fn list_documents(&self, location: &str) -> Result<Vec<DiscoveredFile>, String> {
        if self.failing_locations.lock().unwrap().contains(location) {
            return Err(format!("listing '{}' failed", location));
        }
        Ok(self
            .documents
            .lock()
            .unwrap()
            .get(location)
            .cloned()
            .unwrap_or_default())
    }

    async fn export_document(&self, file_id: &str, _format: DocFormat) -> Result<Vec<u8>, String> {
        self.exports
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| format!("no such document '{}'", file_id))
    }

    async fn import_document(
        &self,
        location: &str,
        name: &str,
        format: DocFormat,
        content: &[u8],
    ) -> Result<String, String> {
        self.imports.lock().unwrap().push((
            location.to_string(),
            name.to_string(),
            format,
            content.to_vec(),
        ));
        Ok(format!("imported-{}", name))
    }

    async fn document_modified_time(&self, file_id: &str) -> Result<String, String> {
        self.modified_times
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| format!("no such document '{}'", file_id))
    }
}

pub fn discovered(file_id: &str, name: &str, modified: &str) -> DiscoveredFile {
    DiscoveredFile {
        file_id: file_id.to_string(),
        file_name: name.to_string(),
        mime_type: DocFormat::Docx.mime().to_string(),
        last_modified: modified.to_string(),
        size: 2048,
        url: format!("https://workspace.example/files/{}", file_id),
    }
}

pub fn folder(id: &str, source: &str, out: &str, triggers: Vec<Trigger>) -> FolderMapping {
    FolderMapping {
        id: id.to_string(),
        name: format!("folder-{}", id),
        source_location: source.to_string(),
        translations_location: out.to_string(),
        organization_slug: "acme".to_string(),
        project_slug: "docs".to_string(),
        formats: vec![DocFormat::Docx],
        triggers,
    }
}

pub fn mapping(file_id: &str, folder_id: &str, resource_id: Option<&str>) -> FileMapping {
    FileMapping {
        file_id: file_id.to_string(),
        file_name: format!("{}.docx", file_id),
        folder_id: folder_id.to_string(),
        resource_id: resource_id.map(str::to_string),
        last_modified: "2026-01-01T00:00:00Z".to_string(),
        mime_type: DocFormat::Docx.mime().to_string(),
        size: 2048,
        url: String::new(),
        date_added: "2026-01-01T00:00:00Z".to_string(),
        date_mapped: resource_id.map(|_| "2026-01-02T00:00:00Z".to_string()),
    }
}

/// Full application state over an in-memory store, fake clients and a
/// millisecond poll policy.
pub fn test_state(
    config: SyncConfig,
) -> (
    crate::state::AppState,
    std::sync::Arc<FakePlatform>,
    std::sync::Arc<FakeWorkspace>,
) {
    use crate::activity_log::ActivityLog;
    use crate::config_store::ConfigStore;
    use crate::detector::ChangeDetector;
    use crate::orchestrator::{PollPolicy, SyncOrchestrator};
    use std::sync::Arc;
    use std::time::Duration;

    let store = ConfigStore::open_in_memory().unwrap();
    store.write(&config).unwrap();
    let log = ActivityLog::new(store.clone());
    let platform = Arc::new(FakePlatform::default());
    let workspace = Arc::new(FakeWorkspace::default());
    let policy = PollPolicy {
        interval: Duration::from_millis(1),
        max_attempts: 10,
    };
    let orchestrator = SyncOrchestrator::new(
        store.clone(),
        log.clone(),
        platform.clone(),
        workspace.clone(),
        policy,
    );
    let detector = ChangeDetector::new(store.clone(), log.clone(), workspace.clone());
    let state = crate::state::AppState {
        store,
        log,
        detector,
        orchestrator,
        platform: platform.clone(),
    };
    (state, platform, workspace)
}

/// One folder (`f1`, triggers: translated) with one mapped document
/// `file-1` / `guide.docx` bound to resource `o:acme:p:docs:r:guide`.
pub fn mapped_config() -> SyncConfig {
    let mut config = SyncConfig::default();
    config.settings.api_token = "test-token".to_string();
    config
        .folders
        .push(folder("f1", "loc-src", "loc-out", vec![Trigger::Translated]));
    let mut m = mapping("file-1", "f1", Some("o:acme:p:docs:r:guide"));
    m.file_name = "guide.docx".to_string();
    config.file_mappings.push(m);
    config
}
