//! Response envelopes
//!
//! JSON success and error shapes shared by the operation handlers. Errors
//! echo the identifying path(s) so callers can correlate failures with
//! their requests.

use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use crate::error::{StorageError, error_status};
use crate::storage::results::DirEntryInfo;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub path: String,
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub success: bool,
    pub source: String,
    pub dest: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub path: String,
    pub entries: Vec<DirEntryInfo>,
}

/// Error envelope echoing a single path
pub fn path_error(err: &StorageError, path: &str) -> HttpResponse {
    HttpResponse::build(error_status(err)).json(json!({
        "success": false,
        "error": err.to_string(),
        "path": path,
    }))
}

/// Error envelope echoing both move paths
pub fn move_error(err: &StorageError, message: &str, source: &str, dest: &str) -> HttpResponse {
    HttpResponse::build(error_status(err)).json(json!({
        "success": false,
        "error": message,
        "source": source,
        "dest": dest,
    }))
}

/// Plain-text error body, used by the download service
pub fn text_error(err: &StorageError) -> HttpResponse {
    HttpResponse::build(error_status(err))
        .content_type("text/plain; charset=utf-8")
        .body(err.to_string())
}
