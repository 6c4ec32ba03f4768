//! Introspection methods.

use crate::rpc::methods::{METHODS, find_method};
use crate::rpc::params::Params;
use crate::rpc::protocol::RpcError;
use crate::rpc::value::RpcValue;

pub fn list_methods() -> RpcValue {
    let mut names: Vec<&str> = METHODS.iter().map(|m| m.name).collect();
    names.sort_unstable();
    RpcValue::from(names)
}

/// Each signature as `[return, param...]`.
pub fn method_signature(params: &Params) -> Result<RpcValue, RpcError> {
    let name = params.string(0)?;
    let def = find_method(name).ok_or_else(|| RpcError::method_not_found(name))?;

    let signatures = def
        .signatures
        .iter()
        .map(|s| {
            let mut types = Vec::with_capacity(s.params.len() + 1);
            types.push(s.returns.name());
            types.extend(s.params.iter().map(|p| p.name()));
            RpcValue::from(types)
        })
        .collect();

    Ok(RpcValue::Array(signatures))
}

pub fn method_help(params: &Params) -> Result<RpcValue, RpcError> {
    let name = params.string(0)?;
    let def = find_method(name).ok_or_else(|| RpcError::method_not_found(name))?;
    Ok(RpcValue::from(def.help))
}
