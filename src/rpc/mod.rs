//! RPC surface: typed values, signatures, the JSON-RPC envelope and the
//! method table.

pub mod methods;
pub mod params;
pub mod protocol;
pub mod signature;
pub mod value;

pub use protocol::{ErrorCode, RpcError, RpcReply, RpcRequest, RpcResponse, process};
pub use value::RpcValue;
