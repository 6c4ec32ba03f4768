//! Handler for the RPC endpoint.

use axum::{Json, body::Bytes, extract::State};

use crate::rpc::{RpcReply, process};
use crate::state::AppState;

/// Runs a JSON-RPC request or batch.
///
/// # Endpoint
///
/// `POST /api/v2/rpc`
///
/// The body is read raw so that malformed JSON is answered with a JSON-RPC
/// parse error instead of an HTTP rejection. Faults are reported inside the
/// response with status 200.
///
/// # Example
///
/// ```json
/// {
///   "jsonrpc": "2.0",
///   "method": "ox.getAdvertiserPublisherStatistics",
///   "params": ["3f9c...", 1, {"dateTime.iso8601": "20070101T00:00:00"}],
///   "id": 1
/// }
/// ```
pub async fn rpc_handler(State(state): State<AppState>, body: Bytes) -> Json<RpcReply> {
    Json(process(&state, &body).await)
}
