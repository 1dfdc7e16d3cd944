use serde::{Deserialize, Serialize};

/// Tracked association between one discovered workspace document and, once
/// assigned, its remote translatable resource.
///
/// A mapping is created by the change detector on first sighting of a
/// document, with `resource_id` empty ("pending"). The owner assigns the
/// resource id exactly once; from then on the webhook path joins incoming
/// events to documents through it. `last_modified` is bumped after a
/// confirmed successful upload so the next scan does not re-detect the
/// same revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMapping {
    pub file_id: String,
    pub file_name: String,
    /// Id of the owning `FolderMapping`. A mapping whose folder no longer
    /// exists is orphaned: kept in storage, skipped during processing.
    pub folder_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub last_modified: String,
    pub mime_type: String,
    pub size: u64,
    pub url: String,
    pub date_added: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_mapped: Option<String>,
}

impl FileMapping {
    /// A mapping is pending until the owner assigns a remote resource.
    pub fn is_pending(&self) -> bool {
        self.resource_id.as_deref().map_or(true, str::is_empty)
    }
}
