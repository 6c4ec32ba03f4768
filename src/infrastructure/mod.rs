//! Infrastructure layer for storage integrations.
//!
//! This layer implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process implementation used without a database

pub mod memory;
pub mod persistence;
