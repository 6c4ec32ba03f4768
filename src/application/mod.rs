//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and business rules and are what the
//! RPC methods call into.
//!
//! # Available Services
//!
//! - [`services::session_service::SessionService`] - Logon, logoff and session checks
//! - [`services::advertiser_service::AdvertiserService`] - Advertiser lifecycle
//! - [`services::stats_service::StatsService`] - Publisher and daily statistics reports
//!
//! [`session_sweeper`] runs alongside the server and drops expired sessions.

pub mod services;
pub mod session_sweeper;
