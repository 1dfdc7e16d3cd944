//! HTTP surface of the service: the owner-facing configuration and sync
//! API consumed by the UI, plus the inbound webhook endpoint the
//! translation platform delivers events to.

pub mod activity;
pub mod mappings;
pub mod settings;
pub mod sync;
pub mod webhook;
