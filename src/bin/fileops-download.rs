//! Download service entry point.
//!
//! Also carries the read-only listing routes.

use actix_web::web;
use log::error;

use fileops::config::ServiceConfig;
use fileops::handlers::{download, list};
use fileops::server;

fn register(cfg: &mut web::ServiceConfig) {
    download::register(cfg);
    list::register(cfg);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    server::run(config, register).await
}
