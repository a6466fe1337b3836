//! Hiroba chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 7070 --upload-dir ./uploads
//! SSL_ENABLED=true cargo run --bin hiroba-server
//! ```

use clap::Parser;
use hiroba_server::{app::build_state, config::ServerConfig, ui::Server};
use hiroba_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "info");

    let config = ServerConfig::parse();
    tracing::debug!("{:?}", config);

    if config.ssl_enabled {
        tracing::info!(
            "SSL enabled, keystore: {}",
            config.keystore_path.display()
        );
        if !config.keystore_path.exists() {
            tracing::warn!(
                "Keystore '{}' does not exist",
                config.keystore_path.display()
            );
        }
    }

    let state = match build_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize server: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(state);
    if let Err(e) = server
        .run(config.host.clone(), config.effective_port())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
