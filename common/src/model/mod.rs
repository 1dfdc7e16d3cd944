pub mod config;
pub mod file_mapping;
pub mod folder;
pub mod settings;
pub mod webhook;
