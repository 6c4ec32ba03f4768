//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs live next to them as
//! `New*` structs; partial updates as `*Patch`.
//!
//! - [`Advertiser`] - account whose delivery is reported
//! - [`Publisher`] - inventory source the statistics are grouped by
//! - [`NewStatsEntry`], [`PublisherStatistics`], [`DailyStatistics`] - raw rows and report records
//! - [`Session`] - an authenticated RPC caller

pub mod advertiser;
pub mod publisher;
pub mod session;
pub mod statistics;

pub use advertiser::{Advertiser, AdvertiserPatch, NewAdvertiser};
pub use publisher::{NewPublisher, Publisher};
pub use session::{NewSession, Session};
pub use statistics::{DailyStatistics, NewStatsEntry, PublisherStatistics, Totals};
