//! Backend entry-point: configuration, logging, and the HTTP server.

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Local development reads configuration from a .env file; a missing
    // file is not an error.
    dotenvy::dotenv().ok();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    info!(addr = %config.bind_addr(), "starting trip planner backend");
    create_server(config)?.await
}
