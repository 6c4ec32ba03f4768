//! Session issuance and verification for RPC callers.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::NewSession;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

pub const INVALID_SESSION: &str = "Session ID is invalid";
pub const INVALID_CREDENTIALS: &str = "Username or password is incorrect";

/// Operator account allowed to log on.
#[derive(Clone)]
pub struct OperatorCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for OperatorCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Service for logging operators on and off and checking session ids.
///
/// Session ids are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage, so a leaked session table cannot be replayed without the secret.
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    credentials: OperatorCredentials,
    signing_secret: String,
    ttl: Duration,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// # Arguments
    ///
    /// - `repository` - session storage
    /// - `credentials` - the operator account accepted by [`SessionService::logon`]
    /// - `signing_secret` - HMAC key for session id hashing
    /// - `ttl` - idle lifetime; each verification extends it
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        credentials: OperatorCredentials,
        signing_secret: String,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            credentials,
            signing_secret,
            ttl,
        }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .map_err(|_| AppError::internal("Invalid signing key", json!({})))
    }

    /// Hashes a raw session id with the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_session_id(&self, session_id: &str) -> Result<String, AppError> {
        let mut mac = self.mac()?;
        mac.update(session_id.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Compares two secrets in constant time by comparing their MACs.
    fn secrets_match(&self, given: &str, expected: &str) -> Result<bool, AppError> {
        let mut expected_mac = self.mac()?;
        expected_mac.update(expected.as_bytes());
        let tag = expected_mac.finalize().into_bytes();

        let mut given_mac = self.mac()?;
        given_mac.update(given.as_bytes());
        Ok(given_mac.verify_slice(&tag).is_ok())
    }

    /// Checks credentials and issues a new session id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the username or password is wrong.
    pub async fn logon(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user_ok = self.secrets_match(username, &self.credentials.username)?;
        let password_ok = self.secrets_match(password, &self.credentials.password)?;

        if !(user_ok && password_ok) {
            tracing::info!("Rejected logon");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS, json!({})));
        }

        let session_id = generate_session_id();
        let new_session = NewSession {
            session_hash: self.hash_session_id(&session_id)?,
            username: username.to_string(),
            expires_at: Utc::now() + self.ttl,
        };
        self.repository.create(new_session).await?;

        tracing::info!(username, "Session opened");
        Ok(session_id)
    }

    /// Verifies a session id and slides its expiry forward.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the session is unknown or expired.
    pub async fn verify(&self, session_id: &str) -> Result<(), AppError> {
        let session_hash = self.hash_session_id(session_id)?;
        let now = Utc::now();

        if self
            .repository
            .find_active(&session_hash, now)
            .await?
            .is_none()
        {
            return Err(AppError::unauthorized(INVALID_SESSION, json!({})));
        }

        self.repository.touch(&session_hash, now + self.ttl).await?;
        Ok(())
    }

    /// Ends a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the session does not exist.
    pub async fn logoff(&self, session_id: &str) -> Result<(), AppError> {
        let session_hash = self.hash_session_id(session_id)?;

        if !self.repository.delete(&session_hash).await? {
            return Err(AppError::unauthorized(INVALID_SESSION, json!({})));
        }

        tracing::info!("Session closed");
        Ok(())
    }

    /// Removes sessions whose expiry has passed and returns how many.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let purged = self.repository.purge_expired(Utc::now()).await?;
        if purged > 0 {
            tracing::debug!(purged, "Expired sessions removed");
        }
        Ok(purged)
    }
}

/// Generates a random 256-bit session id, hex-encoded.
fn generate_session_id() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}
