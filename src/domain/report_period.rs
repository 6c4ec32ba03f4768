//! Date range accepted by statistics reports.
//!
//! Dates arrive as wire timestamps; only the calendar day is kept. The
//! representable range mirrors a 32-bit Unix clock, so years outside
//! 1970..=2038 are rejected before any data access.

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::json;

use crate::error::AppError;

pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 2038;

pub const YEAR_OUT_OF_RANGE: &str = "Year should be in range 1970-2038";
pub const START_AFTER_END: &str = "The start date is after the end date";

/// A calendar day inside the reportable year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the year is outside 1970..=2038.
    pub fn new(date: NaiveDate) -> Result<Self, AppError> {
        use chrono::Datelike;

        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(AppError::bad_request(
                YEAR_OUT_OF_RANGE,
                json!({ "date": date.to_string() }),
            ));
        }
        Ok(Self(date))
    }

    /// Builds a report date from a wire timestamp, dropping the time of day.
    pub fn from_datetime(value: NaiveDateTime) -> Result<Self, AppError> {
        Self::new(value.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Optional start and end days with `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportPeriod {
    start: Option<ReportDate>,
    end: Option<ReportDate>,
}

impl ReportPeriod {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when both days are given and the start
    /// falls after the end.
    pub fn new(start: Option<ReportDate>, end: Option<ReportDate>) -> Result<Self, AppError> {
        if let (Some(s), Some(e)) = (start, end)
            && s > e
        {
            return Err(AppError::bad_request(
                START_AFTER_END,
                json!({ "start": s.date().to_string(), "end": e.date().to_string() }),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Option<ReportDate> {
        self.start
    }

    pub fn end(&self) -> Option<ReportDate> {
        self.end
    }

    /// Half-open UTC window covering whole days in `tz`.
    ///
    /// The lower bound is local midnight of the start day, the upper bound is
    /// local midnight of the day after the end day.
    pub fn to_utc_window(&self, tz: Tz) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let from = self.start.map(|d| local_midnight(d.date(), tz));
        let to = self.end.map(|d| {
            let next = d.date().checked_add_days(Days::new(1)).unwrap_or(d.date());
            local_midnight(next, tz)
        });
        (from, to)
    }
}

fn local_midnight(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = day.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        // Midnight skipped by a DST jump; the day starts one hour later.
        LocalResult::None => {
            let shifted = naive + chrono::Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_bounds_accepted() {
        assert!(ReportDate::new(day(1970, 1, 1)).is_ok());
        assert!(ReportDate::new(day(2038, 12, 31)).is_ok());
    }

    #[test]
    fn test_year_below_min_rejected() {
        let err = ReportDate::new(day(1969, 12, 31)).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.message(), YEAR_OUT_OF_RANGE);
    }

    #[test]
    fn test_year_above_max_rejected() {
        let err = ReportDate::new(day(2039, 1, 1)).unwrap_err();
        assert_eq!(err.message(), YEAR_OUT_OF_RANGE);
    }

    #[test]
    fn test_from_datetime_drops_time() {
        let dt = day(2007, 5, 3).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(ReportDate::from_datetime(dt).unwrap().date(), day(2007, 5, 3));
    }

    #[test]
    fn test_start_after_end_rejected() {
        let start = ReportDate::new(day(2038, 1, 1)).ok();
        let end = ReportDate::new(day(1970, 1, 1)).ok();
        let err = ReportPeriod::new(start, end).unwrap_err();
        assert_eq!(err.message(), START_AFTER_END);
    }

    #[test]
    fn test_same_day_is_valid() {
        let d = ReportDate::new(day(1970, 1, 1)).ok();
        assert!(ReportPeriod::new(d, d).is_ok());
    }

    #[test]
    fn test_open_ended_periods_are_valid() {
        let d = ReportDate::new(day(2020, 6, 1)).ok();
        assert!(ReportPeriod::new(d, None).is_ok());
        assert!(ReportPeriod::new(None, d).is_ok());
        assert!(ReportPeriod::new(None, None).is_ok());
    }

    #[test]
    fn test_utc_window_covers_whole_days() {
        let period = ReportPeriod::new(
            ReportDate::new(day(2020, 6, 1)).ok(),
            ReportDate::new(day(2020, 6, 2)).ok(),
        )
        .unwrap();

        let (from, to) = period.to_utc_window(Tz::UTC);
        assert_eq!(from.unwrap().to_rfc3339(), "2020-06-01T00:00:00+00:00");
        assert_eq!(to.unwrap().to_rfc3339(), "2020-06-03T00:00:00+00:00");
    }

    #[test]
    fn test_window_in_manager_timezone() {
        let period = ReportPeriod::new(ReportDate::new(day(2020, 1, 15)).ok(), None).unwrap();

        let (from, to) = period.to_utc_window(chrono_tz::Europe::Berlin);
        // Berlin is UTC+1 in January.
        assert_eq!(from.unwrap().to_rfc3339(), "2020-01-14T23:00:00+00:00");
        assert!(to.is_none());
    }

    #[test]
    fn test_unbounded_window() {
        let (from, to) = ReportPeriod::default().to_utc_window(Tz::UTC);
        assert!(from.is_none());
        assert!(to.is_none());
    }
}
