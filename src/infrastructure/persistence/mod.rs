//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters.
//!
//! # Repositories
//!
//! - [`PgAdvertiserRepository`] - Advertiser lifecycle
//! - [`PgPublisherRepository`] - Publisher registry
//! - [`PgStatsRepository`] - Hourly statistics rows and report aggregation
//! - [`PgSessionRepository`] - RPC session storage

pub mod pg_advertiser_repository;
pub mod pg_publisher_repository;
pub mod pg_session_repository;
pub mod pg_stats_repository;

pub use pg_advertiser_repository::PgAdvertiserRepository;
pub use pg_publisher_repository::PgPublisherRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_stats_repository::PgStatsRepository;
