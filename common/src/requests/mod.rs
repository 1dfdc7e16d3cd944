use serde::{Deserialize, Serialize};

/// Outcome of an owner-invoked manual operation, returned to the UI so it
/// can display the result. Scheduled and webhook-triggered work never
/// returns this; it only logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResult {
    pub success: bool,
    pub message: String,
}

impl OpResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Request payload for assigning a remote resource to a pending mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub file_id: String,
    pub resource_id: String,
}

/// Request payload for a manual upload trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_id: String,
}

/// Request payload for a manual download trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub resource_id: String,
    pub language: String,
}

/// Aggregate file-mapping counts shown on the status panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStatusCounts {
    pub total: usize,
    /// Discovered but not yet mapped to a remote resource.
    pub pending: usize,
    pub mapped: usize,
}
