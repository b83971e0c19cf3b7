//! Move service entry point.

use log::error;

use fileops::config::ServiceConfig;
use fileops::handlers::rename;
use fileops::server;

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

    server::run(config, rename::register).await
}
