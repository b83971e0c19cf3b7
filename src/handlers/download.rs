//! Download operation
//!
//! Streams an existing file back to the caller with an attachment
//! disposition naming the final path segment. Conditional and range
//! requests are honored by the underlying file responder. Error bodies
//! are plain text, unlike the JSON envelopes of the mutating services.

use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, web};
use log::{info, warn};
use serde::Deserialize;
use std::io;

use crate::error::StorageError;
use crate::handlers::responses;
use crate::server::AppState;
use crate::storage::operations;
use crate::storage::validation::resolve_path;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    /// Overrides the URL suffix when present
    pub path: Option<String>,
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/download").route(web::get().to(handle_download)))
        .service(web::resource("/api/v1/download/{path:.*}").route(web::get().to(handle_download)));
}

async fn handle_download(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<DownloadQuery>,
) -> HttpResponse {
    let rel = query
        .into_inner()
        .path
        .filter(|p| !p.is_empty())
        .or_else(|| {
            req.match_info()
                .get("path")
                .filter(|p| !p.is_empty())
                .map(str::to_string)
        });
    let Some(rel) = rel else {
        return responses::text_error(&StorageError::PathRequired);
    };

    let resolved = match resolve_path(&state.root, &rel) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!("Rejected download path {}: {}", rel, err);
            return responses::text_error(&err);
        }
    };

    if let Err(err) = operations::prepare_retrieval(&resolved, &rel) {
        return responses::text_error(&err);
    }

    let filename = resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string());

    match NamedFile::open_async(&resolved).await {
        Ok(file) => {
            info!("Serving {} as {}", resolved.display(), filename);
            file.set_content_disposition(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename)],
            })
            .into_response(&req)
        }
        // The stat above raced a concurrent delete
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            responses::text_error(&StorageError::NotFound(rel))
        }
        Err(e) => responses::text_error(&StorageError::IoError(e)),
    }
}
