//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{domain::Namespace, infrastructure::in_memory_core, usecase::RelayCore};

use super::{
    handler::{
        default_websocket_handler, get_namespaces, get_room_detail, get_rooms, health_check,
        namespaced_websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Signaling relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::in_memory(vec![Namespace::default_namespace()]);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(cores: Vec<RelayCore>) -> Self {
        Self {
            state: Arc::new(AppState::new(cores)),
        }
    }

    /// One in-memory core per namespace.
    pub fn in_memory(namespaces: Vec<Namespace>) -> Self {
        Self::new(namespaces.into_iter().map(in_memory_core).collect())
    }

    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(default_websocket_handler))
            .route("/ws/{namespace}", get(namespaced_websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/namespaces", get(get_namespaces))
            .route("/api/namespaces/{namespace}/rooms", get(get_rooms))
            .route(
                "/api/namespaces/{namespace}/rooms/{room_id}",
                get(get_room_detail),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or if serving fails.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await?;
        Ok(())
    }

    /// Serve on an already bound listener until Ctrl+C / SIGTERM.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("Signaling relay listening on {}", addr);
        for core in self.state.cores() {
            let path = if core.namespace.as_str() == Namespace::DEFAULT {
                "/ws".to_string()
            } else {
                format!("/ws/{}", core.namespace)
            };
            tracing::info!("Namespace '{}': ws://{}{}", core.namespace, addr, path);
        }
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
