//! Business logic services for the application layer.

pub mod advertiser_service;
pub mod session_service;
pub mod stats_service;

pub use advertiser_service::AdvertiserService;
pub use session_service::{OperatorCredentials, SessionService};
pub use stats_service::{ReportQuery, StatsService};
