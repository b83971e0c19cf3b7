//! Error handling
//!
//! Defines error types and status mapping for the file-operation services.

pub mod handlers;
pub mod types;

pub use handlers::error_status;
pub use types::StorageError;
