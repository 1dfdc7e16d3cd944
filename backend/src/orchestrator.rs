//! The two asynchronous sync workflows.
//!
//! Upload: export a workspace document to its interchange archive, submit
//! it to the platform's async upload endpoint, poll the job to a terminal
//! state, then re-arm change detection by recording the document's current
//! modification time.
//!
//! Download: submit an async download request, poll until the job reports
//! readiness through a redirect-style content URL, fetch the content and
//! import it into the folder's translations destination.
//!
//! Both workflows share one bounded poll loop policy: a fixed sleep between
//! polls and a fixed attempt ceiling. Hitting the ceiling abandons the job
//! and logs a timeout; the remote job keeps running server-side and the
//! owner can re-trigger. Nothing in here panics or propagates past the
//! invocation that started it.

use crate::activity_log::ActivityLog;
use crate::config_store::ConfigStore;
use crate::platform::{ApiError, DownloadPoll, TranslationPlatform};
use crate::workspace::DocumentWorkspace;
use common::jobs::JobStatus;
use common::model::folder::DocFormat;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Leading bytes of a valid interchange archive ("PK"). An export that
/// starts with anything else is corrupt and must not reach the platform.
const ARCHIVE_SIGNATURE: [u8; 2] = [0x50, 0x4B];

/// Poll pacing shared by both workflows.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            max_attempts: 10,
        }
    }
}

#[derive(Clone)]
pub struct SyncOrchestrator {
    store: ConfigStore,
    log: ActivityLog,
    platform: Arc<dyn TranslationPlatform>,
    workspace: Arc<dyn DocumentWorkspace>,
    policy: PollPolicy,
}

impl SyncOrchestrator {
    pub fn new(
        store: ConfigStore,
        log: ActivityLog,
        platform: Arc<dyn TranslationPlatform>,
        workspace: Arc<dyn DocumentWorkspace>,
        policy: PollPolicy,
    ) -> Self {
        Self {
            store,
            log,
            platform,
            workspace,
            policy,
        }
    }

    /// Uploads one mapped document to its remote resource.
    ///
    /// Returns a human-readable outcome message; errors are already logged
    /// and recorded in the activity log when this returns.
    pub async fn upload(&self, file_id: &str, resource_id: &str) -> Result<String, String> {
        let config = self.store.read();
        let mapping = config
            .mapping(file_id)
            .ok_or_else(|| format!("no file mapping for '{}'", file_id))?;
        let file_name = mapping.file_name.clone();
        let format = DocFormat::from_mime(&mapping.mime_type)
            .ok_or_else(|| format!("'{}' has unsupported type {}", file_name, mapping.mime_type))?;

        let content = self
            .workspace
            .export_document(file_id, format)
            .await
            .map_err(|e| {
                self.log.append(&format!("Export of '{}' failed: {}", file_name, e));
                e
            })?;
        if content.len() < 2 || content[..2] != ARCHIVE_SIGNATURE {
            let msg = format!("export of '{}' produced an invalid archive", file_name);
            self.log.append(&msg);
            return Err(msg);
        }

        let job_id = self
            .platform
            .submit_upload(resource_id, &content)
            .await
            .map_err(|e| {
                self.log
                    .append(&format!("Upload submit for '{}' failed: {}", file_name, e));
                e.to_string()
            })?;
        info!("upload of '{}' submitted as job {}", file_name, job_id);

        self.poll_upload(&job_id, file_id, &file_name).await
    }

    /// Polls one upload job to a terminal state within the attempt budget.
    async fn poll_upload(
        &self,
        job_id: &str,
        file_id: &str,
        file_name: &str,
    ) -> Result<String, String> {
        for attempt in 1..=self.policy.max_attempts {
            match self.platform.upload_status(job_id).await {
                Ok(poll) => match poll.status {
                    JobStatus::Succeeded => {
                        self.record_upload_success(file_id).await;
                        let msg = format!("Upload of '{}' succeeded", file_name);
                        self.log.append(&msg);
                        return Ok(msg);
                    }
                    JobStatus::Failed => {
                        let detail = poll.details.unwrap_or_else(|| "no details".to_string());
                        let msg =
                            format!("Upload of '{}' failed remotely: {}", file_name, detail);
                        self.log.append(&msg);
                        return Err(msg);
                    }
                    JobStatus::Pending | JobStatus::Processing => {}
                },
                // 5xx and transport hiccups spend an attempt and re-poll.
                Err(ApiError::Transient(e)) => {
                    warn!("poll {} of upload job {} failed: {}", attempt, job_id, e);
                }
                // Auth and protocol errors fail closed.
                Err(e) => {
                    let msg = format!("Upload of '{}' aborted: {}", file_name, e);
                    self.log.append(&msg);
                    return Err(msg);
                }
            }
            if attempt < self.policy.max_attempts {
                sleep(self.policy.interval).await;
            }
        }

        let msg = format!(
            "Upload of '{}' did not settle after {} polls, giving up",
            file_name, self.policy.max_attempts
        );
        self.log.append(&msg);
        Err(msg)
    }

    /// After a confirmed upload, stamp the mapping with the document's
    /// current modification time so the next scan does not re-detect the
    /// revision that was just uploaded.
    async fn record_upload_success(&self, file_id: &str) {
        let modified = match self.workspace.document_modified_time(file_id).await {
            Ok(t) => t,
            Err(e) => {
                warn!("could not refresh modification time of '{}': {}", file_id, e);
                return;
            }
        };
        let mut config = self.store.read();
        if let Some(mapping) = config.mapping_mut(file_id) {
            mapping.last_modified = modified;
        }
        if let Err(e) = self.store.write(&config) {
            warn!("could not persist mapping update for '{}': {}", file_id, e);
        }
    }

    /// Downloads one completed translation and imports it next to its
    /// source document's folder mapping.
    pub async fn download(&self, resource_id: &str, language: &str) -> Result<String, String> {
        let job_id = self
            .platform
            .submit_download(resource_id, language)
            .await
            .map_err(|e| {
                self.log.append(&format!(
                    "Download request for '{}' ({}) failed: {}",
                    resource_id, language, e
                ));
                e.to_string()
            })?;
        info!(
            "download of '{}' ({}) submitted as job {}",
            resource_id, language, job_id
        );

        let url = self.poll_download(&job_id, resource_id).await?;
        let content = self.platform.fetch_content(&url).await.map_err(|e| {
            let msg = format!("Fetching translation for '{}' failed: {}", resource_id, e);
            self.log.append(&msg);
            msg
        })?;

        self.import_translation(resource_id, language, &content).await
    }

    /// Polls one download job until it yields a content URL.
    async fn poll_download(&self, job_id: &str, resource_id: &str) -> Result<String, String> {
        for attempt in 1..=self.policy.max_attempts {
            match self.platform.download_status(job_id).await {
                Ok(DownloadPoll::Ready { url }) => return Ok(url),
                Ok(DownloadPoll::Pending) => {}
                Ok(DownloadPoll::Failed { details }) => {
                    let msg = format!(
                        "Download for '{}' failed remotely: {}",
                        resource_id, details
                    );
                    self.log.append(&msg);
                    return Err(msg);
                }
                Err(ApiError::Transient(e)) => {
                    warn!("poll {} of download job {} failed: {}", attempt, job_id, e);
                }
                Err(e) => {
                    let msg = format!("Download for '{}' aborted: {}", resource_id, e);
                    self.log.append(&msg);
                    return Err(msg);
                }
            }
            if attempt < self.policy.max_attempts {
                sleep(self.policy.interval).await;
            }
        }

        let msg = format!(
            "Download for '{}' did not settle after {} polls, giving up",
            resource_id, self.policy.max_attempts
        );
        self.log.append(&msg);
        Err(msg)
    }

    /// Resolves the target mapping and folder, derives the output name and
    /// imports the fetched content as a new native document.
    async fn import_translation(
        &self,
        resource_id: &str,
        language: &str,
        content: &[u8],
    ) -> Result<String, String> {
        let config = self.store.read();
        let mapping = config.mapping_by_resource(resource_id).ok_or_else(|| {
            let msg = format!("no file mapping matches resource '{}'", resource_id);
            self.log.append(&msg);
            msg
        })?;
        let folder = config.folder(&mapping.folder_id).ok_or_else(|| {
            let msg = format!(
                "mapping '{}' is orphaned, folder '{}' no longer exists",
                mapping.file_name, mapping.folder_id
            );
            self.log.append(&msg);
            msg
        })?;
        let format = DocFormat::from_mime(&mapping.mime_type).ok_or_else(|| {
            format!(
                "'{}' has unsupported type {}",
                mapping.file_name, mapping.mime_type
            )
        })?;

        let name = translated_name(&mapping.file_name, language);
        self.workspace
            .import_document(&folder.translations_location, &name, format, content)
            .await
            .map_err(|e| {
                let msg = format!("Import of '{}' failed: {}", name, e);
                self.log.append(&msg);
                msg
            })?;

        // Completion notification hook; delivery is handled elsewhere.
        let msg = format!(
            "Imported translation '{}' into '{}'",
            name, folder.name
        );
        self.log.append(&msg);
        Ok(msg)
    }
}

/// Output name for a translated document: `{base}_{LANGUAGE_UPPER}` with
/// the original extension.
fn translated_name(file_name: &str, language: &str) -> String {
    let lang = language.to_uppercase();
    match file_name.rsplit_once('.') {
        Some((base, ext)) => format!("{}_{}.{}", base, lang, ext),
        None => format!("{}_{}", file_name, lang),
    }
}
