//! PostgreSQL implementation of publisher repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPublisher, Publisher};
use crate::domain::repositories::PublisherRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PublisherRow {
    id: i64,
    name: String,
}

/// PostgreSQL repository for publishers.
pub struct PgPublisherRepository {
    pool: Arc<PgPool>,
}

impl PgPublisherRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PublisherRepository for PgPublisherRepository {
    async fn create(&self, new_publisher: NewPublisher) -> Result<Publisher, AppError> {
        let row = sqlx::query_as::<_, PublisherRow>(
            "INSERT INTO publishers (name) VALUES ($1) RETURNING id, name",
        )
        .bind(new_publisher.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Publisher {
            id: row.id,
            name: row.name,
        })
    }

    async fn list(&self) -> Result<Vec<Publisher>, AppError> {
        let rows = sqlx::query_as::<_, PublisherRow>("SELECT id, name FROM publishers ORDER BY id")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Publisher {
                id: r.id,
                name: r.name,
            })
            .collect())
    }
}
