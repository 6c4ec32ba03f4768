//! Data Transfer Objects for the plain HTTP endpoints.
//!
//! RPC payloads are typed by [`crate::rpc::value::RpcValue`] instead.

pub mod health;
