//! PostgreSQL implementation of session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewSession, Session};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_hash: String,
    username: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(r: SessionRow) -> Self {
        Session {
            session_hash: r.session_hash,
            username: r.username,
            created_at: r.created_at,
            expires_at: r.expires_at,
        }
    }
}

/// PostgreSQL repository for RPC sessions.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO rpc_sessions (session_hash, username, expires_at)
            VALUES ($1, $2, $3)
            RETURNING session_hash, username, created_at, expires_at
            "#,
        )
        .bind(new_session.session_hash)
        .bind(new_session.username)
        .bind(new_session.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_active(
        &self,
        session_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_hash, username, created_at, expires_at
            FROM rpc_sessions
            WHERE session_hash = $1 AND expires_at > $2
            "#,
        )
        .bind(session_hash)
        .bind(now)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Session::from))
    }

    async fn touch(&self, session_hash: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("UPDATE rpc_sessions SET expires_at = $2 WHERE session_hash = $1")
            .bind(session_hash)
            .bind(expires_at)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete(&self, session_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM rpc_sessions WHERE session_hash = $1")
            .bind(session_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM rpc_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
