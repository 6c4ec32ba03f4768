//! Repository trait for RPC sessions.

use crate::domain::entities::{NewSession, Session};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for session storage.
///
/// Sessions are keyed by the HMAC of the issued id, never the raw id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session.
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError>;

    /// Finds a session that has not expired at `now`.
    async fn find_active(
        &self,
        session_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError>;

    /// Moves the expiry of a session.
    async fn touch(&self, session_hash: &str, expires_at: DateTime<Utc>) -> Result<(), AppError>;

    /// Removes a session.
    ///
    /// Returns `Ok(true)` if a session was removed.
    async fn delete(&self, session_hash: &str) -> Result<bool, AppError>;

    /// Removes sessions that expired at or before `now`.
    ///
    /// Returns the number of removed sessions.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}
