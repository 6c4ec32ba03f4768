//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{DailyStatistics, NewStatsEntry, PublisherStatistics};
use crate::domain::repositories::{StatsRepository, StatsWindow};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PublisherStatsRow {
    publisher_id: i64,
    publisher_name: String,
    requests: i64,
    impressions: i64,
    clicks: i64,
    revenue: f64,
}

#[derive(sqlx::FromRow)]
struct DailyStatsRow {
    day: NaiveDate,
    requests: i64,
    impressions: i64,
    clicks: i64,
    revenue: f64,
}

/// PostgreSQL repository for hourly statistics rows and their aggregates.
///
/// Window bounds are bound as nullable timestamps so an open end costs no
/// extra query variant.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record(&self, entry: NewStatsEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO stats_hourly
                (advertiser_id, publisher_id, hour_start, requests, impressions, clicks, revenue)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.advertiser_id)
        .bind(entry.publisher_id)
        .bind(entry.hour_start)
        .bind(entry.requests)
        .bind(entry.impressions)
        .bind(entry.clicks)
        .bind(entry.revenue)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn publisher_statistics(
        &self,
        advertiser_id: i64,
        window: StatsWindow,
    ) -> Result<Vec<PublisherStatistics>, AppError> {
        let rows = sqlx::query_as::<_, PublisherStatsRow>(
            r#"
            SELECT
                p.id                                   AS publisher_id,
                p.name                                 AS publisher_name,
                SUM(s.requests)::BIGINT                AS requests,
                SUM(s.impressions)::BIGINT             AS impressions,
                SUM(s.clicks)::BIGINT                  AS clicks,
                SUM(s.revenue)::DOUBLE PRECISION       AS revenue
            FROM stats_hourly s
            JOIN publishers p ON p.id = s.publisher_id
            WHERE s.advertiser_id = $1
              AND ($2::timestamptz IS NULL OR s.hour_start >= $2)
              AND ($3::timestamptz IS NULL OR s.hour_start < $3)
            GROUP BY p.id, p.name
            ORDER BY p.id
            "#,
        )
        .bind(advertiser_id)
        .bind(window.from)
        .bind(window.to)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| PublisherStatistics {
                publisher_id: r.publisher_id,
                publisher_name: r.publisher_name,
                requests: r.requests,
                impressions: r.impressions,
                clicks: r.clicks,
                revenue: r.revenue,
            })
            .collect())
    }

    async fn daily_statistics(
        &self,
        advertiser_id: i64,
        window: StatsWindow,
    ) -> Result<Vec<DailyStatistics>, AppError> {
        let rows = sqlx::query_as::<_, DailyStatsRow>(
            r#"
            SELECT
                (s.hour_start AT TIME ZONE $4)::date   AS day,
                SUM(s.requests)::BIGINT                AS requests,
                SUM(s.impressions)::BIGINT             AS impressions,
                SUM(s.clicks)::BIGINT                  AS clicks,
                SUM(s.revenue)::DOUBLE PRECISION       AS revenue
            FROM stats_hourly s
            WHERE s.advertiser_id = $1
              AND ($2::timestamptz IS NULL OR s.hour_start >= $2)
              AND ($3::timestamptz IS NULL OR s.hour_start < $3)
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(advertiser_id)
        .bind(window.from)
        .bind(window.to)
        .bind(window.timezone.name())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DailyStatistics {
                day: r.day,
                requests: r.requests,
                impressions: r.impressions,
                clicks: r.clicks,
                revenue: r.revenue,
            })
            .collect())
    }
}
