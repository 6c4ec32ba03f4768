//! Domain layer containing business entities and rules.
//!
//! The domain layer has no dependency on storage or transport. Repository
//! traits define the contracts the infrastructure layer implements.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`report_period`] - Validated date ranges for statistics reports

pub mod entities;
pub mod report_period;
pub mod repositories;

pub use report_period::{ReportDate, ReportPeriod};
