//! Advertiser report methods.
//!
//! Both reports share their parameters:
//! `(sessionId, advertiserId [, startDate [, endDate [, useManagerTimezone]]])`.

use crate::application::services::ReportQuery;
use crate::domain::entities::{DailyStatistics, PublisherStatistics};
use crate::error::AppError;
use crate::rpc::params::Params;
use crate::rpc::protocol::RpcError;
use crate::rpc::value::RpcValue;
use crate::state::AppState;

/// Reads the report parameters and checks the session.
///
/// Date years are checked while reading, so a bad year is reported before
/// an invalid session.
async fn report_query(state: &AppState, params: &Params) -> Result<ReportQuery, AppError> {
    let session_id = params.string(0)?;
    let advertiser_id = params.int(1)?;
    let start = params.optional_report_date(2)?;
    let end = params.optional_report_date(3)?;
    let use_manager_timezone = params.optional_bool(4)?.unwrap_or(false);

    state.session_service.verify(session_id).await?;

    Ok(ReportQuery::new(advertiser_id)
        .with_dates(start, end)
        .in_manager_timezone(use_manager_timezone))
}

fn publisher_row(row: PublisherStatistics) -> RpcValue {
    RpcValue::structure([
        ("publisherId", RpcValue::Int(row.publisher_id)),
        ("publisherName", RpcValue::String(row.publisher_name)),
        ("requests", RpcValue::Int(row.requests)),
        ("impressions", RpcValue::Int(row.impressions)),
        ("clicks", RpcValue::Int(row.clicks)),
        ("revenue", RpcValue::Double(row.revenue)),
    ])
}

fn daily_row(row: DailyStatistics) -> RpcValue {
    RpcValue::structure([
        ("day", RpcValue::date(row.day)),
        ("requests", RpcValue::Int(row.requests)),
        ("impressions", RpcValue::Int(row.impressions)),
        ("clicks", RpcValue::Int(row.clicks)),
        ("revenue", RpcValue::Double(row.revenue)),
    ])
}

pub async fn by_publisher(state: &AppState, params: &Params) -> Result<RpcValue, RpcError> {
    let query = report_query(state, params).await?;
    let rows = state.stats_service.publisher_statistics(query).await?;
    Ok(RpcValue::Array(rows.into_iter().map(publisher_row).collect()))
}

pub async fn by_day(state: &AppState, params: &Params) -> Result<RpcValue, RpcError> {
    let query = report_query(state, params).await?;
    let rows = state.stats_service.daily_statistics(query).await?;
    Ok(RpcValue::Array(rows.into_iter().map(daily_row).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_publisher_row_has_every_field() {
        let RpcValue::Struct(map) = publisher_row(PublisherStatistics {
            publisher_id: 4,
            publisher_name: "Daily News".to_string(),
            requests: 10,
            impressions: 8,
            clicks: 2,
            revenue: 1.25,
        }) else {
            panic!("expected struct");
        };

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["clicks", "impressions", "publisherId", "publisherName", "requests", "revenue"]
        );
        assert_eq!(map["revenue"], RpcValue::Double(1.25));
    }

    #[test]
    fn test_daily_row_day_is_midnight() {
        let day = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        let RpcValue::Struct(map) = daily_row(DailyStatistics {
            day,
            requests: 1,
            impressions: 1,
            clicks: 0,
            revenue: 0.0,
        }) else {
            panic!("expected struct");
        };
        assert_eq!(map["day"], RpcValue::date(day));
    }
}
