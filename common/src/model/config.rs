use crate::model::file_mapping::FileMapping;
use crate::model::folder::FolderMapping;
use crate::model::settings::Settings;
use serde::{Deserialize, Serialize};

/// The whole persisted configuration: settings plus every folder and file
/// mapping, stored and rewritten as one blob (last write wins).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub folders: Vec<FolderMapping>,
    #[serde(default)]
    pub file_mappings: Vec<FileMapping>,
}

impl SyncConfig {
    pub fn folder(&self, folder_id: &str) -> Option<&FolderMapping> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    pub fn mapping(&self, file_id: &str) -> Option<&FileMapping> {
        self.file_mappings.iter().find(|m| m.file_id == file_id)
    }

    pub fn mapping_mut(&mut self, file_id: &str) -> Option<&mut FileMapping> {
        self.file_mappings.iter_mut().find(|m| m.file_id == file_id)
    }

    /// Resolves a file mapping from a webhook event's resource identifier.
    ///
    /// Matching rule: containment in either direction between the stored id
    /// and the incoming id. Inherited behavior; two distinct resources
    /// sharing a common substring could cross-match.
    pub fn mapping_by_resource(&self, resource_id: &str) -> Option<&FileMapping> {
        if resource_id.is_empty() {
            return None;
        }
        self.file_mappings.iter().find(|m| {
            m.resource_id.as_deref().is_some_and(|stored| {
                !stored.is_empty() && (stored.contains(resource_id) || resource_id.contains(stored))
            })
        })
    }
}
