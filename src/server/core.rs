//! HTTP server assembly
//!
//! Each operation binary hands its route registrar to `run`, which wires
//! it together with the health endpoint, request logging, and the shared
//! application state built from the configuration.

use actix_multipart::form::MultipartFormConfig;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::config::ServiceConfig;
use crate::handlers;
use crate::storage::validation::normalize_path;

/// Immutable per-process state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Lexically cleaned absolute storage root
    pub root: PathBuf,
    pub max_upload_bytes: usize,
}

/// Registers one operation's routes on an application
pub type RouteRegistrar = fn(&mut web::ServiceConfig);

/// Runs one operation service until shutdown
pub async fn run(config: ServiceConfig, register: RouteRegistrar) -> io::Result<()> {
    let root = prepare_storage_root(&config)?;
    info!(
        "Listening on {} (storage root: {})",
        config.listen_socket(),
        root.display()
    );

    let state = web::Data::new(AppState {
        root,
        max_upload_bytes: config.max_upload_bytes(),
    });
    let max_upload_bytes = state.max_upload_bytes;
    let bind = (config.bind_address.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(MultipartFormConfig::default().total_limit(max_upload_bytes))
            .wrap(Logger::default())
            .configure(handlers::health::register)
            .configure(register)
    })
    .bind(bind)?
    .run()
    .await
}

/// Ensure the storage root exists and return its cleaned absolute form
pub fn prepare_storage_root(config: &ServiceConfig) -> io::Result<PathBuf> {
    let raw = config.storage_root_path();
    let absolute = if raw.is_absolute() {
        raw
    } else {
        std::env::current_dir()?.join(raw)
    };
    let root = normalize_path(&absolute);
    fs::create_dir_all(&root)?;
    Ok(root)
}
