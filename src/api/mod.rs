//! HTTP layer.
//!
//! # Modules
//!
//! - [`dto`] - response bodies for the plain HTTP endpoints
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - rate limiting and request tracing
//! - [`routes`] - route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
