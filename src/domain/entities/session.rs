//! Session entity for authenticated RPC callers.

use chrono::{DateTime, Utc};

/// A logged-on operator session.
///
/// Only the HMAC of the issued session id is stored; the raw id lives with
/// the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub session_hash: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Input data for storing a new session.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub session_hash: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}
