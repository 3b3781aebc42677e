//! UI server lifecycle — starts/stops the axum HTTP server that serves the
//! console to the browser.
//!
//! Pattern: bind → spawn background task → return handle with shutdown
//! channel. The server binds loopback only; the console is a local tool,
//! not a network service.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::config;
use crate::core_state::CoreState;
use crate::ui::router::ui_router;

/// Metadata for a running UI server.
#[derive(Debug, Clone, Serialize)]
pub struct UiSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to the running UI server.
pub struct UiServer {
    pub session: UiSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl UiServer {
    /// Shut down the server gracefully. Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("UI server shutdown signal sent");
        }
    }
}

/// Start the UI server on the given address (port 0 picks an ephemeral
/// one). Builds the router over the shared state and spawns `axum::serve`
/// in a background task.
pub async fn start_ui_server(
    core: Arc<CoreState>,
    addr: SocketAddr,
) -> Result<UiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind UI server on {addr}: {e}"))?;

    let bound = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(addr = %bound, "UI server binding");

    let app = ui_router(core, config::assets_dir());

    let session = UiSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: bound.to_string(),
        port: bound.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("UI server received shutdown signal");
        };

        tracing::info!(addr = %bound, "UI server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("UI server error: {e}");
        }

        tracing::info!("UI server stopped");
    });

    Ok(UiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    use crate::backend::BackendClient;
    use crate::session::SessionStore;

    fn test_core(dir: &tempfile::TempDir) -> Arc<CoreState> {
        Arc::new(CoreState::with(
            BackendClient::new("http://127.0.0.1:1"),
            SessionStore::open(dir.path().join("session.json")),
        ))
    }

    fn loopback() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_ui_server(test_core(&dir), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        // Session probe answers without auth.
        let url = format!("http://127.0.0.1:{}/ui/session", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert!(json["user"].is_null());

        server.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn gated_route_answers_401_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_ui_server(test_core(&dir), loopback())
            .await
            .expect("server should start");

        let url = format!("http://127.0.0.1:{}/ui/dashboard", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

        server.shutdown();
    }

    #[tokio::test]
    async fn server_session_has_valid_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_ui_server(test_core(&dir), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.started_at.is_empty());
        assert!(server.session.server_addr.contains(':'));

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_ui_server(test_core(&dir), loopback())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown();
    }
}
