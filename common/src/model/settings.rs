use serde::{Deserialize, Serialize};

/// Owner-wide settings. Exactly one instance exists, stored as part of the
/// persisted configuration blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Bearer token for the translation platform API.
    pub api_token: String,
    /// Shared secret for webhook signature verification. When absent,
    /// incoming webhooks are accepted without a signature check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
    /// Minutes between change-detection scans of the source folders.
    pub check_interval_minutes: u64,
    /// Publicly reachable URL of this service's webhook endpoint, as
    /// registered with the translation platform. Verification recomputes
    /// the signature over this exact string.
    pub webhook_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            webhook_secret: None,
            check_interval_minutes: 10,
            webhook_url: String::new(),
        }
    }
}
