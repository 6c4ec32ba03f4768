//! In-process storage backend.
//!
//! Used when no database is configured and by the integration tests. All
//! data is lost when the process exits.

mod memory_store;

pub use memory_store::MemoryStore;
