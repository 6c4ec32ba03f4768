//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/v2/rpc` - JSON-RPC endpoint (session id per call)
//! - `GET  /health`     - Health check: storage reachability (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the RPC routes

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// When `config.behind_proxy` is set, rate limiting reads the client IP from
/// `X-Forwarded-For` / `X-Real-IP` instead of the peer socket address.
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(state: AppState, config: &Config) -> Result<Router> {
    let rpc = api::routes::rpc_routes();
    let rpc = if config.behind_proxy {
        rpc.layer(rate_limit::proxied_layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
        )?)
    } else {
        rpc.layer(rate_limit::layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
        )?)
    };

    Ok(Router::new()
        .route("/health", get(health_handler))
        .nest("/api", rpc)
        .with_state(state)
        .layer(tracing::layer()))
}
