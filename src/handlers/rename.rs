//! Move operation
//!
//! Relocates a file or directory with a single rename call. Source and
//! destination are resolved independently; the destination's parent is
//! created when missing. Cross-volume renames surface the underlying
//! error, there is no copy-and-delete fallback.

use actix_web::{HttpResponse, web};
use log::{error, warn};
use serde::Deserialize;
use std::io;

use crate::error::StorageError;
use crate::handlers::responses::{self, MoveResponse};
use crate::server::AppState;
use crate::storage::operations;
use crate::storage::validation::resolve_path;

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub dest: String,
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/move").route(web::post().to(handle_move)));
}

async fn handle_move(
    state: web::Data<AppState>,
    body: web::Json<MoveRequest>,
) -> HttpResponse {
    let MoveRequest { source, dest } = body.into_inner();

    if source.is_empty() || dest.is_empty() {
        return responses::move_error(
            &StorageError::PathRequired,
            "source and dest are required",
            &source,
            &dest,
        );
    }

    // Source and destination may differ in depth, so each is resolved on
    // its own.
    let resolved_source = match resolve_path(&state.root, &source) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!("Rejected move source {}: {}", source, err);
            return responses::move_error(&err, &err.to_string(), &source, &dest);
        }
    };
    let resolved_dest = match resolve_path(&state.root, &dest) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!("Rejected move destination {}: {}", dest, err);
            return responses::move_error(&err, &err.to_string(), &source, &dest);
        }
    };

    let source_display = source.clone();
    let outcome = web::block(move || {
        operations::move_entry(&resolved_source, &resolved_dest, &source_display)
    })
    .await;

    match outcome {
        Ok(Ok(())) => HttpResponse::Ok().json(MoveResponse {
            success: true,
            source,
            dest,
        }),
        Ok(Err(err)) => {
            let message = match &err {
                StorageError::NotFound(_) => "source not found".to_string(),
                other => other.to_string(),
            };
            responses::move_error(&err, &message, &source, &dest)
        }
        Err(e) => {
            error!("Move task failed: {}", e);
            let err = StorageError::IoError(io::Error::other("move task cancelled"));
            responses::move_error(&err, &err.to_string(), &source, &dest)
        }
    }
}
