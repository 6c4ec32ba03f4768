//! JSON-RPC 2.0 envelope.
//!
//! Requests carry positional [`RpcValue`] params. A body holding a JSON
//! array is a batch and is answered with an array of responses in request
//! order.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::rpc::methods;
use crate::rpc::value::RpcValue;
use crate::state::AppState;

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request with its params already decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Vec<RpcValue>,
    #[serde(default)]
    pub id: Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RpcValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Value,
}

impl RpcResponse {
    pub fn result(id: Value, result: RpcValue) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(ErrorCode::MethodNotFound, format!("Unknown method {method}"))
            .with_data(json!({ "method": method }))
    }
}

/// Fault codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    /// Invalid JSON was received by the server.
    ParseError = -32700,
    /// The JSON sent is not a valid Request object.
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    /// Wrong parameter count or type.
    InvalidParams = -32602,
    InternalError = -32603,

    // Application faults (-32000 to -32099)
    /// A well-typed value was rejected by business rules.
    Validation = -32010,
    /// Bad credentials or an invalid session.
    Unauthorized = -32011,
    NotFound = -32012,
    Conflict = -32013,
}

impl From<AppError> for RpcError {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::InvalidParams { .. } => ErrorCode::InvalidParams,
            AppError::Validation { .. } => ErrorCode::Validation,
            AppError::Unauthorized { .. } => ErrorCode::Unauthorized,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Conflict { .. } => ErrorCode::Conflict,
            AppError::Internal { .. } => ErrorCode::InternalError,
        };

        let error = RpcError::new(code, err.message());
        match err.details() {
            Value::Null => error,
            Value::Object(map) if map.is_empty() => error,
            details => error.with_data(details.clone()),
        }
    }
}

/// Reply to one HTTP body: a single response or a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RpcReply {
    Single(RpcResponse),
    Batch(Vec<RpcResponse>),
}

/// Parses a request body, runs every call in it and collects the responses.
///
/// Never fails: malformed input becomes a fault response.
pub async fn process(state: &AppState, body: &[u8]) -> RpcReply {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable RPC body");
            return RpcReply::Single(RpcResponse::error(
                Value::Null,
                RpcError::new(ErrorCode::ParseError, "Parse error"),
            ));
        }
    };

    match payload {
        Value::Array(items) if items.is_empty() => RpcReply::Single(RpcResponse::error(
            Value::Null,
            RpcError::new(ErrorCode::InvalidRequest, "Empty batch"),
        )),
        Value::Array(items) => {
            let mut responses = Vec::with_capacity(items.len());
            for item in items {
                responses.push(handle_call(state, item).await);
            }
            RpcReply::Batch(responses)
        }
        single => RpcReply::Single(handle_call(state, single).await),
    }
}

async fn handle_call(state: &AppState, payload: Value) -> RpcResponse {
    let request = match decode_request(payload) {
        Ok(r) => r,
        Err((id, error)) => return RpcResponse::error(id, error),
    };

    match methods::dispatch(state, &request.method, request.params).await {
        Ok(result) => RpcResponse::result(request.id, result),
        Err(error) => RpcResponse::error(request.id, error),
    }
}

/// Checks the envelope shape before decoding params.
///
/// Malformed params (for example an unparseable date) are a params fault,
/// anything else wrong with the envelope is an invalid request.
fn decode_request(payload: Value) -> Result<RpcRequest, (Value, RpcError)> {
    let Value::Object(mut fields) = payload else {
        return Err((
            Value::Null,
            RpcError::new(ErrorCode::InvalidRequest, "Request must be an object"),
        ));
    };

    let id = fields.get("id").cloned().unwrap_or(Value::Null);
    let invalid = |message: &str| (id.clone(), RpcError::new(ErrorCode::InvalidRequest, message));

    if fields.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return Err(invalid("Invalid JSON-RPC version"));
    }
    let Some(method) = fields.get("method").and_then(Value::as_str).map(str::to_string) else {
        return Err(invalid("Missing method name"));
    };

    let params = match fields.remove("params") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut params = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match RpcValue::try_from(item) {
                    Ok(v) => params.push(v),
                    Err(reason) => {
                        return Err((
                            id.clone(),
                            RpcError::new(
                                ErrorCode::InvalidParams,
                                format!("Invalid value at param {}: {reason}", index + 1),
                            ),
                        ));
                    }
                }
            }
            params
        }
        Some(_) => return Err(invalid("Params must be an array")),
    };

    Ok(RpcRequest {
        jsonrpc: JSONRPC_VERSION.to_string(),
        method,
        params,
        id,
    })
}
