//! Shared library for the file-operation services.
//!
//! Four thin binaries (upload, download, move, delete) each expose one
//! filesystem operation over HTTP against a single storage root. They all
//! share the path-safety contract, storage operations, configuration, and
//! response envelopes defined here.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod storage;

pub use crate::config::ServiceConfig;
pub use crate::server::AppState;
