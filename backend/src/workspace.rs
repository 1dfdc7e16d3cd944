//! Client for the cloud document workspace.
//!
//! The workspace offers no push notifications: discovery is poll-based
//! listing of a location's documents. Export and import move documents in
//! and out of their interchange archive representation; the conversion
//! itself happens on the workspace side and is opaque here.
//!
//! `DocumentWorkspace` is the seam the change detector and the download
//! workflow depend on; tests substitute an in-memory implementation.

use async_trait::async_trait;
use common::model::folder::DocFormat;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One document found by a folder scan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredFile {
    pub file_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub last_modified: String,
    pub size: u64,
    pub url: String,
}

#[async_trait]
pub trait DocumentWorkspace: Send + Sync {
    /// Lists all documents at a workspace location, unfiltered; format
    /// filtering against a folder mapping happens in the detector.
    async fn list_documents(&self, location: &str) -> Result<Vec<DiscoveredFile>, String>;

    /// Exports a document as interchange-archive bytes.
    async fn export_document(&self, file_id: &str, format: DocFormat) -> Result<Vec<u8>, String>;

    /// Imports archive bytes as a new native document at a location;
    /// returns the new document's id.
    async fn import_document(
        &self,
        location: &str,
        name: &str,
        format: DocFormat,
        content: &[u8],
    ) -> Result<String, String>;

    /// Current modification timestamp of one document.
    async fn document_modified_time(&self, file_id: &str) -> Result<String, String>;
}

/// reqwest-backed implementation against the workspace REST API.
pub struct WorkspaceClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct FileList {
    files: Vec<DiscoveredFile>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMeta {
    last_modified: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedFile {
    file_id: String,
}

impl WorkspaceClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl DocumentWorkspace for WorkspaceClient {
    async fn list_documents(&self, location: &str) -> Result<Vec<DiscoveredFile>, String> {
        let response = self
            .client
            .get(self.url("/files"))
            .query(&[("location", location)])
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("listing '{}' returned {}", location, response.status()));
        }
        let list: FileList = response.json().await.map_err(|e| e.to_string())?;
        Ok(list.files)
    }

    async fn export_document(&self, file_id: &str, format: DocFormat) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(self.url(&format!("/files/{}/export", file_id)))
            .query(&[("format", format.extension())])
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("export of '{}' returned {}", file_id, response.status()));
        }
        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(bytes.to_vec())
    }

    async fn import_document(
        &self,
        location: &str,
        name: &str,
        format: DocFormat,
        content: &[u8],
    ) -> Result<String, String> {
        let response = self
            .client
            .post(self.url("/files"))
            .query(&[("location", location), ("name", name)])
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, format.mime())
            .body(content.to_vec())
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("import of '{}' returned {}", name, response.status()));
        }
        let imported: ImportedFile = response.json().await.map_err(|e| e.to_string())?;
        Ok(imported.file_id)
    }

    async fn document_modified_time(&self, file_id: &str) -> Result<String, String> {
        let response = self
            .client
            .get(self.url(&format!("/files/{}", file_id)))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("metadata of '{}' returned {}", file_id, response.status()));
        }
        let meta: FileMeta = response.json().await.map_err(|e| e.to_string())?;
        Ok(meta.last_modified)
    }
}
