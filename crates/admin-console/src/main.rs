//! # Admin Console Backend
//!
//! Runs the upload backend (`POST /upload-avatar`) configured by `admin-console.toml`
//! until Ctrl-C, then shuts the console system down.
//!
//! ```bash
//! RUST_LOG=info cargo run -p admin-console
//! ```

use admin_console::config::ConsoleConfig;
use admin_console::lifecycle::ConsoleSystem;
use store_framework::tracing::setup_tracing;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ConsoleConfig::load()?;
    info!(path = %ConsoleConfig::config_path().display(), "Configuration loaded");

    let system = ConsoleSystem::new(config)?;

    let mut server = system.upload_server();
    let addr = server.try_bind(&system.config().upload.bind_addr).await?;
    info!(%addr, "Upload backend listening");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
        }
        info!("Ctrl-C received");
    };
    server.run(shutdown).await?;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
