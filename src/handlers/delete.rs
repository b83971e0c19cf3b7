//! Delete operation
//!
//! Removes a file or directory tree under the storage root. The root
//! itself is never a valid target. Non-recursive requests only remove
//! files and already-empty directories.

use actix_web::{HttpRequest, HttpResponse, web};
use log::{error, warn};
use serde::Deserialize;
use std::io;

use crate::error::StorageError;
use crate::handlers::responses::{self, DeleteResponse};
use crate::server::AppState;
use crate::storage::operations;
use crate::storage::validation::resolve_path;

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Overrides the URL suffix when present
    pub path: Option<String>,
    #[serde(default)]
    pub recursive: bool,
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/delete")
            .route(web::delete().to(handle_delete))
            .route(web::post().to(handle_delete)),
    )
    .service(
        web::resource("/api/v1/delete/{path:.*}")
            .route(web::delete().to(handle_delete))
            .route(web::post().to(handle_delete)),
    );
}

async fn handle_delete(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<DeleteQuery>,
) -> HttpResponse {
    let query = query.into_inner();
    let rel = query.path.filter(|p| !p.is_empty()).or_else(|| {
        req.match_info()
            .get("path")
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    });
    let Some(rel) = rel else {
        return responses::path_error(&StorageError::PathRequired, "");
    };

    let resolved = match resolve_path(&state.root, &rel) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!("Rejected delete path {}: {}", rel, err);
            return responses::path_error(&err, &rel);
        }
    };

    let root = state.root.clone();
    let display = rel.clone();
    let outcome =
        web::block(move || operations::remove_entry(&root, &resolved, &display, query.recursive))
            .await;

    match outcome {
        Ok(Ok(())) => HttpResponse::Ok().json(DeleteResponse {
            success: true,
            path: rel,
        }),
        Ok(Err(err)) => responses::path_error(&err, &rel),
        Err(e) => {
            error!("Delete task failed: {}", e);
            responses::path_error(
                &StorageError::IoError(io::Error::other("delete task cancelled")),
                &rel,
            )
        }
    }
}
