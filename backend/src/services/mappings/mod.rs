//! # Mappings Service Module
//!
//! File-mapping management under `/api/mappings`.
//!
//! ## Registered Routes:
//!
//! *   **`POST /api/mappings/assign`**:
//!     - **Handler**: `assign::process`
//!     - **Description**: Assigns a remote resource id to a pending file
//!       mapping. Fails with a structured result, mutating nothing, when
//!       the file id has no pending mapping.
//!
//! *   **`POST /api/mappings/rescan`**:
//!     - **Handler**: `rescan::process`
//!     - **Description**: Forces a change-detection pass now instead of
//!       waiting for the next scheduled tick.
//!
//! *   **`GET /api/mappings/status`**:
//!     - **Handler**: `status::process`
//!     - **Description**: Aggregate mapping counts (total / pending /
//!       mapped) for the status panel.

mod assign;
mod rescan;
mod status;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/mappings";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/assign", post().to(assign::process))
        .route("/rescan", post().to(rescan::process))
        .route("/status", get().to(status::process))
}
