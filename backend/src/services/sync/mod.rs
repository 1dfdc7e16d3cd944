//! # Sync Service Module
//!
//! Manual sync triggers under `/api/sync`, mirroring what the scheduled
//! and webhook paths do but returning a structured result to the caller.
//!
//! ## Registered Routes:
//!
//! *   **`POST /api/sync/upload`**:
//!     - **Handler**: `upload::process`
//!     - **Description**: Uploads one mapped document to its remote
//!       resource now, without waiting for the next scan.
//!
//! *   **`POST /api/sync/download`**:
//!     - **Handler**: `download::process`
//!     - **Description**: Downloads and imports one translation for a
//!       resource/language pair, without waiting for a webhook.
//!
//! *   **`GET /api/sync/languages/{organization}/{project}`**:
//!     - **Handler**: `languages::process`
//!     - **Description**: Language codes configured for a project, used by
//!       the UI to populate the manual download picker.

mod download;
mod languages;
mod upload;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/sync";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/download", post().to(download::process))
        .route(
            "/languages/{organization}/{project}",
            get().to(languages::process),
        )
}
