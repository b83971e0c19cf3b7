//! List operation
//!
//! Read-only directory listing, registered alongside the download service.
//! An empty path lists the storage root itself.

use actix_web::{HttpRequest, HttpResponse, web};
use log::{error, warn};
use serde::Deserialize;
use std::io;

use crate::error::StorageError;
use crate::handlers::responses::{self, ListResponse};
use crate::server::AppState;
use crate::storage::operations;
use crate::storage::validation::resolve_path;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Overrides the URL suffix when present
    pub path: Option<String>,
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/list").route(web::get().to(handle_list)))
        .service(web::resource("/api/v1/list/{path:.*}").route(web::get().to(handle_list)));
}

async fn handle_list(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
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
        })
        .unwrap_or_default();

    let resolved = if rel.is_empty() {
        state.root.clone()
    } else {
        match resolve_path(&state.root, &rel) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!("Rejected list path {}: {}", rel, err);
                return responses::path_error(&err, &rel);
            }
        }
    };

    let display = rel.clone();
    let outcome = web::block(move || operations::list_directory(&resolved, &display)).await;

    match outcome {
        Ok(Ok(entries)) => HttpResponse::Ok().json(ListResponse {
            success: true,
            path: rel,
            entries,
        }),
        Ok(Err(err)) => responses::path_error(&err, &rel),
        Err(e) => {
            error!("List task failed: {}", e);
            responses::path_error(
                &StorageError::IoError(io::Error::other("list task cancelled")),
                &rel,
            )
        }
    }
}
