//! PostgreSQL implementation of advertiser repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Advertiser, AdvertiserPatch, NewAdvertiser};
use crate::domain::repositories::AdvertiserRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct AdvertiserRow {
    id: i64,
    name: String,
    contact_name: Option<String>,
    email: Option<String>,
    comments: Option<String>,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<AdvertiserRow> for Advertiser {
    fn from(r: AdvertiserRow) -> Self {
        Advertiser {
            id: r.id,
            name: r.name,
            contact_name: r.contact_name,
            email: r.email,
            comments: r.comments,
            created_at: r.created_at,
            deleted_at: r.deleted_at,
        }
    }
}

/// PostgreSQL repository for advertisers.
///
/// Deleted rows stay in the table with `deleted_at` set and are filtered out
/// of every read.
pub struct PgAdvertiserRepository {
    pool: Arc<PgPool>,
}

impl PgAdvertiserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdvertiserRepository for PgAdvertiserRepository {
    async fn create(&self, new_advertiser: NewAdvertiser) -> Result<Advertiser, AppError> {
        let row = sqlx::query_as::<_, AdvertiserRow>(
            r#"
            INSERT INTO advertisers (name, contact_name, email, comments)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, contact_name, email, comments, created_at, deleted_at
            "#,
        )
        .bind(new_advertiser.name)
        .bind(new_advertiser.contact_name)
        .bind(new_advertiser.email)
        .bind(new_advertiser.comments)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Advertiser>, AppError> {
        let row = sqlx::query_as::<_, AdvertiserRow>(
            r#"
            SELECT id, name, contact_name, email, comments, created_at, deleted_at
            FROM advertisers
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Advertiser::from))
    }

    async fn list(&self) -> Result<Vec<Advertiser>, AppError> {
        let rows = sqlx::query_as::<_, AdvertiserRow>(
            r#"
            SELECT id, name, contact_name, email, comments, created_at, deleted_at
            FROM advertisers
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Advertiser::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: AdvertiserPatch,
    ) -> Result<Option<Advertiser>, AppError> {
        let row = sqlx::query_as::<_, AdvertiserRow>(
            r#"
            UPDATE advertisers SET
                name         = COALESCE($2, name),
                contact_name = COALESCE($3, contact_name),
                email        = COALESCE($4, email),
                comments     = COALESCE($5, comments)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, contact_name, email, comments, created_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.contact_name)
        .bind(patch.email)
        .bind(patch.comments)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Advertiser::from))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE advertisers SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
