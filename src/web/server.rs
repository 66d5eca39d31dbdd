//! HTTP server

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use super::router::{AppState, CALLBACK_PATH, create_router};
use crate::config::Config;
use crate::{Error, Result};

/// Example application server
pub struct Server {
    /// Configuration
    config: Config,
}

impl Server {
    /// Create a new server
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Bind the listener and serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::new(
            self.config
                .server
                .host
                .parse()
                .map_err(|e| Error::Config(format!("Invalid host: {e}")))?,
            self.config.server.port,
        );

        let state = Arc::new(AppState::new(self.config.provider.clone())?);
        let app = create_router(state);

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        info!("HACKADAY.IO OAUTH EXAMPLE v{}", env!("CARGO_PKG_VERSION"));
        info!(addr = %local_addr, "Listening");
        info!(client_id = %self.config.provider.client_id, "Using Hackaday.io application");
        info!(
            "Register http://<this host>:{}{CALLBACK_PATH} as the redirect URI",
            local_addr.port()
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;

        info!("Server stopped");
        Ok(())
    }
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
