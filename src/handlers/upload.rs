//! Upload operation
//!
//! Streams a multipart file body to a destination under the storage root,
//! creating missing parent directories on the way. The multipart extractor
//! spools the body to a temp file within the configured size ceiling; the
//! copy into the destination is not atomic and a failed copy leaves the
//! partial file for the caller to clean up.

use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_web::{HttpRequest, HttpResponse, web};
use log::{error, warn};
use std::io::{self, Seek};

use crate::error::StorageError;
use crate::handlers::responses::{self, UploadResponse};
use crate::server::AppState;
use crate::storage::operations;
use crate::storage::validation::{relative_display, resolve_path};

/// Multipart fields accepted by the upload endpoint
#[derive(Debug, MultipartForm)]
pub struct UploadForm {
    /// The file body; its content-disposition filename is the default name
    pub file: Option<TempFile>,
    /// Target directory, overriding the URL suffix
    pub path: Option<Text<String>>,
    /// Explicit filename override
    pub filename: Option<Text<String>>,
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/upload")
            .route(web::post().to(handle_upload))
            .route(web::put().to(handle_upload)),
    )
    .service(
        web::resource("/api/v1/upload/{path:.*}")
            .route(web::post().to(handle_upload))
            .route(web::put().to(handle_upload)),
    );
}

async fn handle_upload(
    req: HttpRequest,
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> HttpResponse {
    // Form field wins over the URL suffix; empty means the root itself.
    let target_dir = form
        .path
        .map(|p| p.into_inner())
        .filter(|p| !p.is_empty())
        .or_else(|| req.match_info().get("path").map(str::to_string))
        .unwrap_or_default();

    let Some(file) = form.file else {
        return responses::path_error(&StorageError::MissingFile, &target_dir);
    };

    let filename = form
        .filename
        .map(|f| f.into_inner())
        .filter(|f| !f.is_empty())
        .or_else(|| file.file_name.clone())
        .filter(|f| !f.is_empty());
    let Some(filename) = filename else {
        return responses::path_error(&StorageError::MissingFile, &target_dir);
    };

    // Both the directory and the final file path must pass the resolver;
    // the filename itself can carry traversal segments.
    if !target_dir.is_empty() {
        if let Err(err) = resolve_path(&state.root, &target_dir) {
            warn!("Rejected upload target {}: {}", target_dir, err);
            return responses::path_error(&err, &target_dir);
        }
    }

    let file_rel = if target_dir.is_empty() {
        filename.clone()
    } else {
        format!("{}/{}", target_dir.trim_end_matches('/'), filename)
    };
    let dest = match resolve_path(&state.root, &file_rel) {
        Ok(dest) => dest,
        Err(err) => {
            warn!("Rejected upload destination {}: {}", file_rel, err);
            return responses::path_error(&err, &file_rel);
        }
    };

    let display = relative_display(&state.root, &dest);
    let outcome = web::block(move || {
        let (mut spool, _spool_path) = file.file.into_parts();
        spool
            .rewind()
            .map_err(|e| StorageError::WriteFailed(dest.display().to_string(), e))?;
        operations::store_file(&mut spool, &dest)
    })
    .await;

    match outcome {
        Ok(Ok(result)) => HttpResponse::Created().json(UploadResponse {
            success: true,
            path: display,
            size: result.bytes_written,
        }),
        Ok(Err(err)) => responses::path_error(&err, &display),
        Err(e) => {
            error!("Upload task failed: {}", e);
            responses::path_error(
                &StorageError::IoError(io::Error::other("upload task cancelled")),
                &display,
            )
        }
    }
}
