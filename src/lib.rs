pub mod backend;
pub mod config;
pub mod controllers;
pub mod core_state;
pub mod models;
pub mod segment;
pub mod session;
pub mod ui;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::core_state::CoreState;

/// Run the console: start the UI server and serve until ctrl-c.
pub async fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Amparo starting v{}", config::APP_VERSION);

    let core = Arc::new(CoreState::new());
    tracing::info!(backend = core.backend.base_url(), "Triage backend configured");

    let mut server = ui::server::start_ui_server(core, config::ui_bind_addr())
        .await
        .expect("error while starting Amparo");

    tracing::info!(
        "Console available at http://{} — ctrl-c to stop",
        server.session.server_addr,
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    server.shutdown();
}
