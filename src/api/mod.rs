//! HTTP API server for the orchestration service

pub mod chat;
pub mod email;
pub mod health;
pub mod weather;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::orchestrator::Orchestrator;
use crate::providers::{EmailProvider, WeatherProvider};
use crate::Result;

/// Shared state for API handlers
///
/// Stateless across requests: no conversation or session data lives here,
/// only the provider handles created at process start.
pub struct ApiState {
    pub orchestrator: Orchestrator,
    pub weather: Arc<dyn WeatherProvider>,
    pub email: Arc<dyn EmailProvider>,
    /// Model used when a request does not name one
    pub default_model: String,
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    /// Create a server over the given state
    #[must_use]
    pub fn new(state: Arc<ApiState>, port: u16) -> Self {
        Self { state, port }
    }

    /// Build the router with all routes
    fn router(&self) -> Router {
        Router::new()
            .merge(health::router())
            .merge(weather::router(self.state.clone()))
            .merge(email::router(self.state.clone()))
            .merge(chat::router(self.state.clone()))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}

/// Build the full application router without binding a socket
///
/// Exposed so integration tests can drive the routes directly.
#[must_use]
pub fn router(state: Arc<ApiState>) -> Router {
    ApiServer::new(state, 0).router()
}
