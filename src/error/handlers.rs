//! Error handlers
//!
//! Maps storage errors onto HTTP status codes.

use actix_web::http::StatusCode;

use crate::error::types::StorageError;

/// Convert a storage error to its HTTP status code
pub fn error_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::PathRequired
        | StorageError::NotAFile(_)
        | StorageError::NotADirectory(_)
        | StorageError::DirectoryNotEmpty(_)
        | StorageError::MissingFile => StatusCode::BAD_REQUEST,
        StorageError::PathTraversal(_) | StorageError::RootProtected => StatusCode::FORBIDDEN,
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::CreateDirFailed(_, _)
        | StorageError::CreateFileFailed(_, _)
        | StorageError::WriteFailed(_, _)
        | StorageError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
