//! RPC route configuration.

use crate::api::handlers::rpc_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// RPC routes. Authentication happens per call through session ids.
///
/// # Endpoints
///
/// - `POST /v2/rpc` - JSON-RPC 2.0 request or batch
pub fn rpc_routes() -> Router<AppState> {
    Router::new().route("/v2/rpc", post(rpc_handler))
}
