//! Method table and dispatch.
//!
//! Each entry names a method, the parameter lists it accepts and a help
//! string. Parameters are checked against the signatures before the method
//! body runs, so bodies only deal with well-typed values.

mod advertiser;
mod session;
mod statistics;
mod system;

use crate::rpc::params::Params;
use crate::rpc::protocol::RpcError;
use crate::rpc::signature::{self, ParamType as T, Signature};
use crate::rpc::value::RpcValue;
use crate::state::AppState;

/// Registered method.
#[derive(Debug, Clone, Copy)]
pub struct MethodDef {
    pub name: &'static str,
    /// Longest parameter list first.
    pub signatures: &'static [Signature],
    pub help: &'static str,
}

const REPORT_SIGNATURES: &[Signature] = &[
    Signature { returns: T::Array, params: &[T::String, T::Int, T::DateTime, T::DateTime, T::Boolean] },
    Signature { returns: T::Array, params: &[T::String, T::Int, T::DateTime, T::DateTime] },
    Signature { returns: T::Array, params: &[T::String, T::Int, T::DateTime] },
    Signature { returns: T::Array, params: &[T::String, T::Int] },
];

pub static METHODS: &[MethodDef] = &[
    MethodDef {
        name: "ox.logon",
        signatures: &[Signature { returns: T::String, params: &[T::String, T::String] }],
        help: "Opens a session for the operator account and returns its id.",
    },
    MethodDef {
        name: "ox.logoff",
        signatures: &[Signature { returns: T::Boolean, params: &[T::String] }],
        help: "Closes a session.",
    },
    MethodDef {
        name: "ox.addAdvertiser",
        signatures: &[Signature { returns: T::Int, params: &[T::String, T::Struct] }],
        help: "Creates an advertiser and returns its id. Keys: advertiserName (required), contactName, emailAddress, comments.",
    },
    MethodDef {
        name: "ox.modifyAdvertiser",
        signatures: &[Signature { returns: T::Boolean, params: &[T::String, T::Struct] }],
        help: "Changes the keys present in the struct. advertiserId is required.",
    },
    MethodDef {
        name: "ox.getAdvertiser",
        signatures: &[Signature { returns: T::Struct, params: &[T::String, T::Int] }],
        help: "Returns one advertiser.",
    },
    MethodDef {
        name: "ox.deleteAdvertiser",
        signatures: &[Signature { returns: T::Boolean, params: &[T::String, T::Int] }],
        help: "Deletes an advertiser. Its statistics are no longer reported.",
    },
    MethodDef {
        name: "ox.getAdvertiserPublisherStatistics",
        signatures: REPORT_SIGNATURES,
        help: "Returns requests, impressions, clicks and revenue per publisher for an advertiser. \
               Optional start and end dates bound the report; the fifth parameter evaluates them \
               in the manager timezone.",
    },
    MethodDef {
        name: "ox.getAdvertiserDailyStatistics",
        signatures: REPORT_SIGNATURES,
        help: "Returns requests, impressions, clicks and revenue per day for an advertiser. \
               Takes the same parameters as ox.getAdvertiserPublisherStatistics.",
    },
    MethodDef {
        name: "system.listMethods",
        signatures: &[Signature { returns: T::Array, params: &[] }],
        help: "Lists the names of all methods.",
    },
    MethodDef {
        name: "system.methodSignature",
        signatures: &[Signature { returns: T::Array, params: &[T::String] }],
        help: "Returns the signatures of a method, return type first.",
    },
    MethodDef {
        name: "system.methodHelp",
        signatures: &[Signature { returns: T::String, params: &[T::String] }],
        help: "Returns the help text of a method.",
    },
];

pub fn find_method(name: &str) -> Option<&'static MethodDef> {
    METHODS.iter().find(|m| m.name == name)
}

/// Runs one call.
///
/// # Errors
///
/// Returns a method-not-found fault for unknown names, a params fault when
/// no signature matches, and the method's own fault otherwise.
pub async fn dispatch(
    state: &AppState,
    method: &str,
    values: Vec<RpcValue>,
) -> Result<RpcValue, RpcError> {
    let Some(def) = find_method(method) else {
        tracing::info!(method, "Unknown RPC method");
        metrics::counter!("rpc_unknown_method_total").increment(1);
        return Err(RpcError::method_not_found(method));
    };

    tracing::debug!(method = def.name, params = values.len(), "RPC call");
    metrics::counter!("rpc_calls_total", "method" => def.name).increment(1);

    let result = run(state, def, values).await;

    if let Err(error) = &result {
        metrics::counter!(
            "rpc_faults_total",
            "method" => def.name,
            "code" => error.code.to_string()
        )
        .increment(1);

        if error.code == crate::rpc::protocol::ErrorCode::InternalError as i32 {
            tracing::error!(method = def.name, message = %error.message, "RPC call failed");
        } else {
            tracing::info!(method = def.name, code = error.code, message = %error.message, "RPC fault");
        }
    }

    result
}

async fn run(
    state: &AppState,
    def: &'static MethodDef,
    values: Vec<RpcValue>,
) -> Result<RpcValue, RpcError> {
    signature::check(def.signatures, &values)?;
    let params = Params::new(values);

    match def.name {
        "ox.logon" => session::logon(state, &params).await,
        "ox.logoff" => session::logoff(state, &params).await,
        "ox.addAdvertiser" => advertiser::add(state, &params).await,
        "ox.modifyAdvertiser" => advertiser::modify(state, &params).await,
        "ox.getAdvertiser" => advertiser::get(state, &params).await,
        "ox.deleteAdvertiser" => advertiser::delete(state, &params).await,
        "ox.getAdvertiserPublisherStatistics" => statistics::by_publisher(state, &params).await,
        "ox.getAdvertiserDailyStatistics" => statistics::by_day(state, &params).await,
        "system.listMethods" => Ok(system::list_methods()),
        "system.methodSignature" => system::method_signature(&params),
        "system.methodHelp" => system::method_help(&params),
        other => Err(RpcError::method_not_found(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names_unique() {
        for (i, a) in METHODS.iter().enumerate() {
            assert!(
                METHODS[i + 1..].iter().all(|b| b.name != a.name),
                "duplicate {}",
                a.name
            );
        }
    }

    #[test]
    fn test_signatures_longest_first() {
        for method in METHODS {
            let arities: Vec<usize> = method.signatures.iter().map(|s| s.params.len()).collect();
            let mut sorted = arities.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(arities, sorted, "{}", method.name);
        }
    }

    #[test]
    fn test_find_method() {
        assert!(find_method("ox.getAdvertiserPublisherStatistics").is_some());
        assert!(find_method("ox.getPublisherStatistics").is_none());
    }
}
