//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handler::{download_file, stats, status, upload_file, upload_voice, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Chat server: WebSocket channel plus the HTTP file and status API
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 7070).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router
    ///
    /// Upload routes lift axum's default body limit; the upload use case
    /// enforces its own cap while streaming.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/chat", get(websocket_handler))
            // HTTP エンドポイント
            .route("/status", get(status))
            .route("/stats", get(stats))
            .route(
                "/upload",
                post(upload_file).layer(DefaultBodyLimit::disable()),
            )
            .route(
                "/upload-voice",
                post(upload_voice).layer(DefaultBodyLimit::disable()),
            )
            .route("/download/{filename}", get(download_file))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the chat server until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!(
            "Connect to: {}://{}/chat",
            if self.state.settings.ssl_enabled { "wss" } else { "ws" },
            bind_addr
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
