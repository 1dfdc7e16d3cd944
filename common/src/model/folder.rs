use serde::{Deserialize, Serialize};

/// Document formats a folder mapping is allowed to pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    Docx,
    Xlsx,
}

impl DocFormat {
    /// MIME type the document workspace reports for this format.
    pub fn mime(&self) -> &'static str {
        match self {
            DocFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocFormat::Docx => "docx",
            DocFormat::Xlsx => "xlsx",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            m if m == DocFormat::Docx.mime() => Some(DocFormat::Docx),
            m if m == DocFormat::Xlsx.mime() => Some(DocFormat::Xlsx),
            _ => None,
        }
    }
}

/// Translation lifecycle events a folder mapping can opt into for
/// automatic download of completed translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Translated,
    Reviewed,
    Proofread,
    Updated,
}

/// An owner-defined pairing of a source document location, a destination
/// for finished translations, a remote project, and the completion events
/// that should trigger automatic download.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMapping {
    pub id: String,
    pub name: String,
    /// Workspace location scanned for translatable documents.
    pub source_location: String,
    /// Workspace location completed translations are imported into.
    pub translations_location: String,
    pub organization_slug: String,
    pub project_slug: String,
    pub formats: Vec<DocFormat>,
    pub triggers: Vec<Trigger>,
}

impl FolderMapping {
    /// Both `formats` and `triggers` must be non-empty; a mapping that can
    /// never match a document or never fire a download is a configuration
    /// error, rejected at save time.
    pub fn validate(&self) -> Result<(), String> {
        if self.formats.is_empty() {
            return Err(format!("folder '{}' has no formats selected", self.name));
        }
        if self.triggers.is_empty() {
            return Err(format!("folder '{}' has no triggers selected", self.name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder() -> FolderMapping {
        FolderMapping {
            id: "f1".to_string(),
            name: "Manuals".to_string(),
            source_location: "loc-src".to_string(),
            translations_location: "loc-out".to_string(),
            organization_slug: "acme".to_string(),
            project_slug: "docs".to_string(),
            formats: vec![DocFormat::Docx],
            triggers: vec![Trigger::Translated],
        }
    }

    #[test]
    fn valid_folder_passes() {
        assert!(folder().validate().is_ok());
    }

    #[test]
    fn empty_triggers_rejected() {
        let mut f = folder();
        f.triggers.clear();
        assert!(f.validate().is_err());
    }

    #[test]
    fn empty_formats_rejected() {
        let mut f = folder();
        f.formats.clear();
        assert!(f.validate().is_err());
    }

    #[test]
    fn formats_serialize_lowercase() {
        let json = serde_json::to_string(&DocFormat::Docx).unwrap();
        assert_eq!(json, "\"docx\"");
    }
}
