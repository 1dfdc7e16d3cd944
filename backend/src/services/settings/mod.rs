//! # Settings Service Module
//!
//! Owner-facing configuration endpoints under `/api/settings`.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/settings`**:
//!     - **Handler**: `get::process`
//!     - **Description**: Returns the full configuration (settings, folder
//!       mappings, file mappings) with both secrets replaced by the masked
//!       placeholder.
//!
//! *   **`POST /api/settings/save`**:
//!     - **Handler**: `save::process`
//!     - **Description**: Validates and persists a full configuration. A
//!       secret field resubmitted as the unchanged masked placeholder keeps
//!       the previously stored value. Folder mappings with an empty format
//!       or trigger set are rejected.
//!
//! *   **`GET /api/settings/test_connection`**:
//!     - **Handler**: `test_connection::process`
//!     - **Description**: Probes the translation platform's `/user`
//!       endpoint with the stored token and reports the outcome.

mod get;
mod save;
mod test_connection;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/settings";

/// Placeholder shown in place of stored secrets. Saving this exact value
/// back means "keep the stored secret".
pub const MASKED_SECRET: &str = "********";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("/save", post().to(save::process))
        .route("/test_connection", get().to(test_connection::process))
}
