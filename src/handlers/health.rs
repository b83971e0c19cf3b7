//! Health endpoint
//!
//! Liveness check exposed by every operation service.

use actix_web::{HttpResponse, web};
use serde_json::json;

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
