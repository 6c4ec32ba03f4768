//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - PostgreSQL implementations live in `crate::infrastructure::persistence`
//! - The in-process implementation lives in `crate::infrastructure::memory`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`AdvertiserRepository`] - Advertiser lifecycle
//! - [`PublisherRepository`] - Publisher registry
//! - [`StatsRepository`] - Statistics rows and report aggregation
//! - [`SessionRepository`] - RPC session storage

pub mod advertiser_repository;
pub mod publisher_repository;
pub mod session_repository;
pub mod stats_repository;

pub use advertiser_repository::AdvertiserRepository;
pub use publisher_repository::PublisherRepository;
pub use session_repository::SessionRepository;
pub use stats_repository::{StatsRepository, StatsWindow};

#[cfg(test)]
pub use advertiser_repository::MockAdvertiserRepository;
#[cfg(test)]
pub use publisher_repository::MockPublisherRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
