//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use converter_types::RateProvider;

use super::handlers::{self, AppState};
use crate::ConversionController;

/// HTTP Server exposing the converter widget.
pub struct HttpServer<P: RateProvider + 'static> {
    state: Arc<AppState<P>>,
}

impl<P: RateProvider + 'static> HttpServer<P> {
    /// Creates a new HTTP server around a shared controller.
    pub fn new(controller: Arc<ConversionController<P>>) -> Self {
        Self {
            state: Arc::new(AppState { controller }),
        }
    }

    /// Returns the controller driven by this server.
    pub fn controller(&self) -> &Arc<ConversionController<P>> {
        &self.state.controller
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/state", get(handlers::get_state::<P>))
            .route("/api/amount", put(handlers::set_amount::<P>))
            .route("/api/source", put(handlers::set_source::<P>))
            .route("/api/target", put(handlers::set_target::<P>))
            .route("/api/swap", post(handlers::swap::<P>))
            .route("/api/convert", post(handlers::convert::<P>))
            .route("/api/rates/refresh", post(handlers::refresh_rates::<P>))
            .route("/api/currencies", get(handlers::list_currencies::<P>))
            .route("/api/history", get(handlers::list_history::<P>))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
