use crate::model::folder::Trigger;
use serde::{Deserialize, Serialize};

/// Inbound webhook body pushed by the translation platform. Unknown extra
/// fields are ignored; `event` stays a raw string here because unrecognized
/// event names must be logged and dropped, not rejected at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: String,
    /// Resource identifier as the platform reports it (compound
    /// organization/project/resource form).
    pub resource: String,
    #[serde(default)]
    pub language: String,
}

/// The closed set of translation lifecycle events this service reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEvent {
    TranslationCompleted,
    ReviewCompleted,
    ProofreadCompleted,
    TranslationUpdated,
}

impl WebhookEvent {
    /// Wire event names as emitted by the platform.
    pub fn parse(event: &str) -> Option<Self> {
        match event {
            "translation_completed" => Some(WebhookEvent::TranslationCompleted),
            "review_completed" => Some(WebhookEvent::ReviewCompleted),
            "proofread_completed" => Some(WebhookEvent::ProofreadCompleted),
            "translation_completed_updated" => Some(WebhookEvent::TranslationUpdated),
            _ => None,
        }
    }

    /// The folder-mapping trigger this event corresponds to.
    pub fn trigger(&self) -> Trigger {
        match self {
            WebhookEvent::TranslationCompleted => Trigger::Translated,
            WebhookEvent::ReviewCompleted => Trigger::Reviewed,
            WebhookEvent::ProofreadCompleted => Trigger::Proofread,
            WebhookEvent::TranslationUpdated => Trigger::Updated,
        }
    }
}
