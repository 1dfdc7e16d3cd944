//! Client for the translation platform's REST API.
//!
//! The platform exposes long-running uploads and downloads as asynchronous
//! jobs: a submit endpoint returns a job id, a poll endpoint reports job
//! state. A download job signals readiness with a redirect-style response
//! whose `Location` carries the content URL, so the HTTP client is built
//! with redirects disabled to keep that observable.
//!
//! `TranslationPlatform` is the seam the orchestrator and the webhook
//! router depend on; tests substitute an in-memory implementation.

use crate::config_store::ConfigStore;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::jobs::JobStatus;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure classes the sync workflows dispatch on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 from the platform; user-actionable, never retried.
    Auth(String),
    /// 5xx or transport failure; retried within the poll attempt budget.
    Transient(String),
    /// The remote operation itself failed; owner must re-trigger.
    Terminal(String),
    /// Response did not match the documented wire format; fails closed.
    Protocol(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Auth(m) => write!(f, "authentication failed: {}", m),
            ApiError::Transient(m) => write!(f, "transient platform error: {}", m),
            ApiError::Terminal(m) => write!(f, "platform error: {}", m),
            ApiError::Protocol(m) => write!(f, "unexpected platform response: {}", m),
        }
    }
}

/// One poll of an async upload job.
#[derive(Debug, Clone)]
pub struct UploadPoll {
    pub status: JobStatus,
    pub details: Option<String>,
}

/// One poll of an async download job.
#[derive(Debug, Clone)]
pub enum DownloadPoll {
    /// Job still running; keep polling.
    Pending,
    /// Content is ready at the given URL.
    Ready { url: String },
    /// The remote job failed.
    Failed { details: String },
}

#[async_trait]
pub trait TranslationPlatform: Send + Sync {
    /// `GET /user`: 200 means the token is valid, 401 means it is not.
    async fn test_connection(&self) -> Result<(), ApiError>;

    /// Submits exported document content for a resource; returns a job id.
    async fn submit_upload(&self, resource_id: &str, content: &[u8]) -> Result<String, ApiError>;

    async fn upload_status(&self, job_id: &str) -> Result<UploadPoll, ApiError>;

    /// Requests a translation download for a resource/language; returns a
    /// job id.
    async fn submit_download(&self, resource_id: &str, language: &str)
        -> Result<String, ApiError>;

    async fn download_status(&self, job_id: &str) -> Result<DownloadPoll, ApiError>;

    /// Fetches ready translation content from the URL a download job
    /// redirected to.
    async fn fetch_content(&self, url: &str) -> Result<Vec<u8>, ApiError>;

    /// Language codes configured for a project.
    async fn project_languages(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<String>, ApiError>;
}

/// reqwest-backed implementation against the real platform. The bearer
/// token is read from the store per request so a settings change takes
/// effect without a restart.
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: ConfigStore,
}

#[derive(Deserialize)]
struct JobCreated {
    data: JobCreatedData,
}

#[derive(Deserialize)]
struct JobCreatedData {
    id: String,
}

#[derive(Deserialize)]
struct JobState {
    data: JobStateData,
}

#[derive(Deserialize)]
struct JobStateData {
    attributes: JobStateAttributes,
}

#[derive(Deserialize)]
struct JobStateAttributes {
    status: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct LanguageList {
    data: Vec<LanguageEntry>,
}

#[derive(Deserialize)]
struct LanguageEntry {
    attributes: LanguageAttributes,
}

#[derive(Deserialize)]
struct LanguageAttributes {
    code: String,
}

impl ApiClient {
    pub fn new(base_url: &str, store: ConfigStore) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            // Download readiness is signalled by a redirect; follow nothing.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> String {
        self.store.read().settings.api_token
    }

    fn check_status(status: StatusCode, body: &str) -> Result<(), ApiError> {
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth("invalid API token".to_string()));
        }
        if status.is_server_error() {
            return Err(ApiError::Transient(format!("{}: {}", status, body)));
        }
        if !status.is_success() {
            return Err(ApiError::Terminal(format!("{}: {}", status, body)));
        }
        Ok(())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.token())
            .send()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        Self::check_status(status, &body)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Protocol(e.to_string()))
    }

    async fn post_job(&self, path: &str, body: serde_json::Value) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.token())
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        Self::check_status(status, &text)?;
        let created: JobCreated =
            serde_json::from_str(&text).map_err(|e| ApiError::Protocol(e.to_string()))?;
        Ok(created.data.id)
    }

    fn parse_status(raw: &str) -> Result<JobStatus, ApiError> {
        match raw {
            "pending" => Ok(JobStatus::Pending),
            "processing" => Ok(JobStatus::Processing),
            "succeeded" => Ok(JobStatus::Succeeded),
            "failed" => Ok(JobStatus::Failed),
            other => Err(ApiError::Protocol(format!("unknown job status '{}'", other))),
        }
    }

    fn details_text(details: Option<serde_json::Value>) -> Option<String> {
        details.map(|d| match d {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

#[async_trait]
impl TranslationPlatform for ApiClient {
    async fn test_connection(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.url("/user"))
            .bearer_auth(self.token())
            .send()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::check_status(status, &body)
    }

    async fn submit_upload(&self, resource_id: &str, content: &[u8]) -> Result<String, ApiError> {
        let body = json!({
            "data": {
                "type": "resource_strings_async_uploads",
                "attributes": {
                    "content": BASE64.encode(content),
                    "content_encoding": "base64",
                },
                "relationships": {
                    "resource": { "data": { "type": "resources", "id": resource_id } }
                }
            }
        });
        self.post_job("/resource_strings_async_uploads", body).await
    }

    async fn upload_status(&self, job_id: &str) -> Result<UploadPoll, ApiError> {
        let state: JobState = self
            .get_json(&format!("/resource_strings_async_uploads/{}", job_id))
            .await?;
        Ok(UploadPoll {
            status: Self::parse_status(&state.data.attributes.status)?,
            details: Self::details_text(state.data.attributes.details),
        })
    }

    async fn submit_download(
        &self,
        resource_id: &str,
        language: &str,
    ) -> Result<String, ApiError> {
        let body = json!({
            "data": {
                "type": "resource_translations_async_downloads",
                "attributes": { "content_as": "file" },
                "relationships": {
                    "resource": { "data": { "type": "resources", "id": resource_id } },
                    "language": { "data": { "type": "languages", "id": format!("l:{}", language) } }
                }
            }
        });
        self.post_job("/resource_translations_async_downloads", body)
            .await
    }

    async fn download_status(&self, job_id: &str) -> Result<DownloadPoll, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/resource_translations_async_downloads/{}", job_id)))
            .bearer_auth(self.token())
            .send()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    ApiError::Protocol("redirect without Location header".to_string())
                })?;
            return Ok(DownloadPoll::Ready {
                url: location.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        Self::check_status(status, &body)?;

        let state: JobState =
            serde_json::from_str(&body).map_err(|e| ApiError::Protocol(e.to_string()))?;
        match Self::parse_status(&state.data.attributes.status)? {
            JobStatus::Pending | JobStatus::Processing => Ok(DownloadPoll::Pending),
            JobStatus::Failed => Ok(DownloadPoll::Failed {
                details: Self::details_text(state.data.attributes.details)
                    .unwrap_or_else(|| "no details".to_string()),
            }),
            // A succeeded download reports readiness via redirect; a literal
            // "succeeded" body without one is out of contract.
            JobStatus::Succeeded => {
                Err(ApiError::Protocol("succeeded without Location".to_string()))
            }
        }
    }

    async fn fetch_content(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token())
            .send()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ApiError::Transient(format!(
                "content fetch returned {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn project_languages(
        &self,
        organization: &str,
        project: &str,
    ) -> Result<Vec<String>, ApiError> {
        let project_id = format!("o:{}:p:{}", organization, project);
        let list: LanguageList = self
            .get_json(&format!("/projects/{}/languages", project_id))
            .await?;
        Ok(list.data.into_iter().map(|l| l.attributes.code).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_parse_to_closed_enum() {
        assert_eq!(ApiClient::parse_status("pending").unwrap(), JobStatus::Pending);
        assert_eq!(
            ApiClient::parse_status("succeeded").unwrap(),
            JobStatus::Succeeded
        );
        assert!(matches!(
            ApiClient::parse_status("exploded"),
            Err(ApiError::Protocol(_))
        ));
    }

    #[test]
    fn error_classes_by_http_status() {
        assert!(matches!(
            ApiClient::check_status(StatusCode::UNAUTHORIZED, ""),
            Err(ApiError::Auth(_))
        ));
        assert!(matches!(
            ApiClient::check_status(StatusCode::BAD_GATEWAY, ""),
            Err(ApiError::Transient(_))
        ));
        assert!(matches!(
            ApiClient::check_status(StatusCode::CONFLICT, ""),
            Err(ApiError::Terminal(_))
        ));
        assert!(ApiClient::check_status(StatusCode::OK, "").is_ok());
    }
}
