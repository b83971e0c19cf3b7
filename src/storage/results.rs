//! Storage result types
//!
//! Defines result structures returned by storage operations.

use serde::Serialize;

/// Result of a completed upload copy
#[derive(Debug, Clone)]
pub struct StoreResult {
    pub bytes_written: u64,
}

/// One entry of a directory listing
#[derive(Debug, Clone, Serialize)]
pub struct DirEntryInfo {
    pub name: String,
    /// Byte size; 0 for directories
    pub size: u64,
    /// Last modification time as Unix seconds
    pub modified: u64,
    pub is_dir: bool,
}
