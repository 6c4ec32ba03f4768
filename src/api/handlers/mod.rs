//! HTTP request handlers.

pub mod health;
pub mod rpc;

pub use health::health_handler;
pub use rpc::rpc_handler;
