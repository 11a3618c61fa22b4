//! HTTP server setup and demo API.
//!
//! # Responsibilities
//! - Create the axum Router with the demo API handlers
//! - Install the request logger on API routes at startup (when enabled)
//! - Apply request timeout and body-size limits
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - The logger is attached with `route_layer` on the `/api` sub-router:
//!   the "API handlers only" predicate is decided once, at startup, and
//!   unmatched paths or operational routes never pay for logging
//! - `logger.enabled = false` means the layer is not installed at all

use std::time::Duration;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::config::schema::AppConfig;
use crate::http::middleware::request_logger::{request_logger, LoggerState};

/// HTTP server for the demo API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let logger = LoggerState::new(config.logger.clone());
        let router = build_router(&config, logger);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            logger_enabled = self.config.logger.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Build the app router with all middleware layers.
///
/// Exposed so integration tests can drive the router in-process with a
/// recording sink instead of the tracing one.
pub fn build_router(config: &AppConfig, logger: LoggerState) -> Router {
    let mut api = api_routes();
    if config.logger.enabled {
        api = api.route_layer(middleware::from_fn_with_state(logger, request_logger));
    }

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
}

/// Routes considered "API handlers" for logging purposes.
fn api_routes() -> Router {
    Router::new()
        .route("/orders/{id}", get(get_order))
        .route("/orders", post(create_order))
        .route("/echo", post(echo))
}

/// A demo resource served by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub item: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
struct NewOrder {
    item: String,
    quantity: u32,
}

async fn get_order(Path(id): Path<u64>) -> Json<Order> {
    Json(Order {
        id,
        item: "demo".to_string(),
        quantity: 1,
    })
}

async fn create_order(Json(order): Json<NewOrder>) -> (StatusCode, Json<Order>) {
    (
        StatusCode::CREATED,
        Json(Order {
            id: 1,
            item: order.item,
            quantity: order.quantity,
        }),
    )
}

/// Echoes the request body; used to observe passthrough behavior.
async fn echo(body: String) -> String {
    body
}

async fn health() -> &'static str {
    "OK"
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
