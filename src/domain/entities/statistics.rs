//! Statistics rows and report records.

use chrono::{DateTime, NaiveDate, Utc};

/// One hourly bucket of delivery data for an advertiser on a publisher.
///
/// Rows are produced by the delivery engine (or the admin CLI) and summed by
/// the reports; this service never edits them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStatsEntry {
    pub advertiser_id: i64,
    pub publisher_id: i64,
    /// Start of the hour, UTC.
    pub hour_start: DateTime<Utc>,
    pub requests: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub revenue: f64,
}

/// Per-publisher aggregate for a report window.
#[derive(Debug, Clone, PartialEq)]
pub struct PublisherStatistics {
    pub publisher_id: i64,
    pub publisher_name: String,
    pub requests: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub revenue: f64,
}

/// Per-day aggregate for a report window.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStatistics {
    pub day: NaiveDate,
    pub requests: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub revenue: f64,
}

/// Running totals shared by the report aggregations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub requests: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub revenue: f64,
}

impl Totals {
    pub fn add(&mut self, entry: &NewStatsEntry) {
        self.requests = self.requests.saturating_add(entry.requests);
        self.impressions = self.impressions.saturating_add(entry.impressions);
        self.clicks = self.clicks.saturating_add(entry.clicks);
        self.revenue += entry.revenue;
    }
}
