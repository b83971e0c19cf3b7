//! Error types
//!
//! Defines domain-specific error types for the storage operations. Every
//! failure is turned into a structured HTTP response at the point of
//! detection; see `error::handlers` for the status mapping.

use std::fmt;
use std::io;

/// Storage operation errors
#[derive(Debug)]
pub enum StorageError {
    /// Empty or missing path input, rejected before resolution
    PathRequired,
    /// Resolved path escaped the storage root
    PathTraversal(String),
    /// Operation targeted the storage root itself
    RootProtected,
    /// Target absent on disk
    NotFound(String),
    /// Target is a directory where a file was required
    NotAFile(String),
    /// Target is a file where a directory was required
    NotADirectory(String),
    /// Non-recursive removal of a directory that still has entries
    DirectoryNotEmpty(String),
    /// Upload request carried no usable file field
    MissingFile,
    CreateDirFailed(String, io::Error),
    CreateFileFailed(String, io::Error),
    WriteFailed(String, io::Error),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PathRequired => write!(f, "No path provided"),
            StorageError::PathTraversal(p) => write!(f, "Forbidden path: {}", p),
            StorageError::RootProtected => {
                write!(f, "Operation not permitted on the storage root")
            }
            StorageError::NotFound(p) => write!(f, "Not found: {}", p),
            StorageError::NotAFile(p) => write!(f, "Not a regular file: {}", p),
            StorageError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            StorageError::DirectoryNotEmpty(p) => write!(f, "Directory not empty: {}", p),
            StorageError::MissingFile => write!(f, "No file provided"),
            StorageError::CreateDirFailed(p, e) => {
                write!(f, "Failed to create directory {}: {}", p, e)
            }
            StorageError::CreateFileFailed(p, e) => {
                write!(f, "Failed to create file {}: {}", p, e)
            }
            StorageError::WriteFailed(p, e) => write!(f, "Failed to write {}: {}", p, e),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}
