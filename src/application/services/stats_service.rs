//! Advertiser statistics reports.

use std::sync::Arc;

use chrono_tz::Tz;

use crate::application::services::advertiser_service::require_advertiser;
use crate::domain::entities::{DailyStatistics, PublisherStatistics};
use crate::domain::repositories::{AdvertiserRepository, StatsRepository, StatsWindow};
use crate::domain::{ReportDate, ReportPeriod};
use crate::error::AppError;

/// Query for an advertiser report.
///
/// Dates are already range-checked [`ReportDate`]s; their relative order is
/// checked by the service after the advertiser has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub advertiser_id: i64,
    pub start: Option<ReportDate>,
    pub end: Option<ReportDate>,
    pub use_manager_timezone: bool,
}

impl ReportQuery {
    pub fn new(advertiser_id: i64) -> Self {
        Self {
            advertiser_id,
            start: None,
            end: None,
            use_manager_timezone: false,
        }
    }

    pub fn with_dates(mut self, start: Option<ReportDate>, end: Option<ReportDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn in_manager_timezone(mut self, enabled: bool) -> Self {
        self.use_manager_timezone = enabled;
        self
    }
}

/// Service producing per-publisher and per-day delivery reports.
pub struct StatsService {
    stats: Arc<dyn StatsRepository>,
    advertisers: Arc<dyn AdvertiserRepository>,
    manager_timezone: Tz,
}

impl StatsService {
    /// Creates a new statistics service.
    ///
    /// `manager_timezone` is used for queries that ask for it; all others are
    /// evaluated in UTC.
    pub fn new(
        stats: Arc<dyn StatsRepository>,
        advertisers: Arc<dyn AdvertiserRepository>,
        manager_timezone: Tz,
    ) -> Self {
        Self {
            stats,
            advertisers,
            manager_timezone,
        }
    }

    /// Resolves the advertiser and the window a report runs over.
    ///
    /// The advertiser is checked before the period so an unknown id wins over
    /// a reversed range.
    async fn prepare(&self, query: &ReportQuery) -> Result<StatsWindow, AppError> {
        require_advertiser(self.advertisers.as_ref(), query.advertiser_id).await?;

        let period = ReportPeriod::new(query.start, query.end)?;
        let timezone = if query.use_manager_timezone {
            self.manager_timezone
        } else {
            Tz::UTC
        };
        let (from, to) = period.to_utc_window(timezone);

        Ok(StatsWindow::new()
            .with_range(from, to)
            .with_timezone(timezone))
    }

    /// Returns one aggregate per publisher that delivered for the advertiser.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the advertiser is unknown or deleted
    /// - [`AppError::Validation`] if the start date is after the end date
    /// - [`AppError::Internal`] on storage errors
    pub async fn publisher_statistics(
        &self,
        query: ReportQuery,
    ) -> Result<Vec<PublisherStatistics>, AppError> {
        let window = self.prepare(&query).await?;
        let rows = self
            .stats
            .publisher_statistics(query.advertiser_id, window)
            .await?;

        tracing::debug!(
            advertiser_id = query.advertiser_id,
            publishers = rows.len(),
            "Publisher statistics computed"
        );
        Ok(rows)
    }

    /// Returns one aggregate per day with delivery for the advertiser.
    ///
    /// # Errors
    ///
    /// Same as [`StatsService::publisher_statistics`].
    pub async fn daily_statistics(
        &self,
        query: ReportQuery,
    ) -> Result<Vec<DailyStatistics>, AppError> {
        let window = self.prepare(&query).await?;
        self.stats
            .daily_statistics(query.advertiser_id, window)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Advertiser;
    use crate::domain::report_period::START_AFTER_END;
    use crate::domain::repositories::{MockAdvertiserRepository, MockStatsRepository};
    use crate::application::services::advertiser_service::UNKNOWN_ADVERTISER_ID;
    use chrono::{NaiveDate, Utc};

    fn existing_advertisers() -> MockAdvertiserRepository {
        let mut repo = MockAdvertiserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            Ok(Some(Advertiser {
                id,
                name: "Acme".to_string(),
                contact_name: None,
                email: None,
                comments: None,
                created_at: Utc::now(),
                deleted_at: None,
            }))
        });
        repo
    }

    fn date(y: i32, m: u32, d: u32) -> Option<ReportDate> {
        ReportDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap()).ok()
    }

    fn row(publisher_id: i64) -> PublisherStatistics {
        PublisherStatistics {
            publisher_id,
            publisher_name: format!("publisher-{publisher_id}"),
            requests: 100,
            impressions: 80,
            clicks: 4,
            revenue: 1.5,
        }
    }

    #[tokio::test]
    async fn test_publisher_statistics_success() {
        let mut stats = MockStatsRepository::new();
        stats
            .expect_publisher_statistics()
            .withf(|id, window| *id == 7 && window.from.is_some() && window.to.is_some())
            .times(1)
            .returning(|_, _| Ok(vec![row(1), row(2)]));

        let service = StatsService::new(Arc::new(stats), Arc::new(existing_advertisers()), Tz::UTC);

        let query = ReportQuery::new(7).with_dates(date(2020, 1, 1), date(2020, 1, 31));
        let rows = service.publisher_statistics(query).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].publisher_id, 1);
    }

    #[tokio::test]
    async fn test_unknown_advertiser_checked_before_period() {
        let mut advertisers = MockAdvertiserRepository::new();
        advertisers.expect_find_by_id().returning(|_| Ok(None));
        let mut stats = MockStatsRepository::new();
        stats.expect_publisher_statistics().times(0);

        let service = StatsService::new(Arc::new(stats), Arc::new(advertisers), Tz::UTC);

        let query = ReportQuery::new(99).with_dates(date(2038, 1, 1), date(1970, 1, 1));
        let err = service.publisher_statistics(query).await.unwrap_err();

        assert_eq!(err.message(), UNKNOWN_ADVERTISER_ID);
    }

    #[tokio::test]
    async fn test_start_after_end_rejected() {
        let mut stats = MockStatsRepository::new();
        stats.expect_publisher_statistics().times(0);

        let service = StatsService::new(Arc::new(stats), Arc::new(existing_advertisers()), Tz::UTC);

        let query = ReportQuery::new(1).with_dates(date(2038, 1, 1), date(1970, 1, 1));
        let err = service.publisher_statistics(query).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.message(), START_AFTER_END);
    }

    #[tokio::test]
    async fn test_manager_timezone_applied_only_on_request() {
        let mut stats = MockStatsRepository::new();
        stats
            .expect_daily_statistics()
            .withf(|_, window| window.timezone == chrono_tz::Europe::Berlin)
            .times(1)
            .returning(|_, _| Ok(vec![]));
        stats
            .expect_daily_statistics()
            .withf(|_, window| window.timezone == Tz::UTC)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = StatsService::new(
            Arc::new(stats),
            Arc::new(existing_advertisers()),
            chrono_tz::Europe::Berlin,
        );

        let query = ReportQuery::new(1).in_manager_timezone(true);
        assert!(service.daily_statistics(query).await.unwrap().is_empty());

        let query = ReportQuery::new(1);
        assert!(service.daily_statistics(query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unbounded_query_has_open_window() {
        let mut stats = MockStatsRepository::new();
        stats
            .expect_publisher_statistics()
            .withf(|_, window| window.from.is_none() && window.to.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = StatsService::new(Arc::new(stats), Arc::new(existing_advertisers()), Tz::UTC);

        let rows = service.publisher_statistics(ReportQuery::new(1)).await.unwrap();
        assert!(rows.is_empty());
    }
}
