//! # Webhook Service Module
//!
//! Inbound endpoint the translation platform pushes lifecycle events to.
//!
//! ## Registered Routes:
//!
//! *   **`POST /api/webhook`**:
//!     - **Handler**: `receive::process`
//!     - **Description**: Verifies the delivery's HMAC signature (skipped
//!       when no secret is configured), resolves the event to a configured
//!       document and, when the owning folder opted into the event's
//!       trigger, starts the download workflow for the event's language.

mod receive;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/webhook";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(receive::process))
}
