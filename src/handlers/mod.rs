//! HTTP handlers
//!
//! One module per operation service, plus the shared response envelopes
//! and the health endpoint every service exposes.

pub mod delete;
pub mod download;
pub mod health;
pub mod list;
pub mod rename;
pub mod responses;
pub mod upload;
