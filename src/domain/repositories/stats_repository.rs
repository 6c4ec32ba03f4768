//! Repository trait for delivery statistics.

use crate::domain::entities::{DailyStatistics, NewStatsEntry, PublisherStatistics};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Time window for statistics queries.
///
/// `from` is inclusive, `to` exclusive; either may be open. `timezone`
/// decides where day boundaries fall for per-day grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub timezone: Tz,
}

impl StatsWindow {
    /// Creates an unbounded window grouped in UTC.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            timezone: Tz::UTC,
        }
    }

    /// Sets the window bounds.
    pub fn with_range(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Sets the timezone used for day grouping.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// True if `at` falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at < to)
    }
}

impl Default for StatsWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Repository interface for recording and aggregating statistics rows.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Stores one hourly statistics row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors, including unknown
    /// advertiser or publisher references.
    async fn record(&self, entry: NewStatsEntry) -> Result<(), AppError>;

    /// Sums rows for one advertiser per publisher, ordered by publisher id.
    ///
    /// Publishers without rows in the window are omitted.
    async fn publisher_statistics(
        &self,
        advertiser_id: i64,
        window: StatsWindow,
    ) -> Result<Vec<PublisherStatistics>, AppError>;

    /// Sums rows for one advertiser per day in `window.timezone`, ordered by day.
    async fn daily_statistics(
        &self,
        advertiser_id: i64,
        window: StatsWindow,
    ) -> Result<Vec<DailyStatistics>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_bounds_are_half_open() {
        let from = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let window = StatsWindow::new().with_range(Some(from), Some(to));

        assert!(window.contains(from));
        assert!(window.contains(Utc.with_ymd_and_hms(2020, 1, 1, 23, 0, 0).unwrap()));
        assert!(!window.contains(to));
        assert!(!window.contains(Utc.with_ymd_and_hms(2019, 12, 31, 23, 0, 0).unwrap()));
    }

    #[test]
    fn test_unbounded_window_contains_everything() {
        let window = StatsWindow::default();
        assert!(window.contains(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));
        assert!(window.contains(Utc.with_ymd_and_hms(2038, 12, 31, 23, 0, 0).unwrap()));
    }
}
