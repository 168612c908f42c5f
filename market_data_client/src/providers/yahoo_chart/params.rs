use chrono::{NaiveDate, NaiveTime};
use snafu::ensure;

use crate::{
    models::request_params::HistoryRequest,
    providers::{ProviderError, ValidationSnafu},
};

/// Fixed bar interval: this client serves daily charts only.
pub const INTERVAL: &str = "1d";

/// Quote-summary modules carrying the metadata fields this system consumes.
pub const METADATA_MODULES: &str = "assetProfile,summaryDetail,price";

/// How many related-news entries to ask the search endpoint for.
pub const NEWS_COUNT: u32 = 10;

/// Rejects ranges the chart endpoint cannot serve.
pub fn validate_range(request: &HistoryRequest) -> Result<(), ProviderError> {
    ensure!(
        request.start < request.end,
        ValidationSnafu {
            message: format!(
                "start {} must be before end {}",
                request.start, request.end
            ),
        }
    );
    Ok(())
}

/// Seconds since the Unix epoch at UTC midnight of `date`.
pub fn epoch_utc_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Query parameters for the chart endpoint: the epoch range and the fixed
/// daily interval.
pub fn chart_query(request: &HistoryRequest) -> Vec<(String, String)> {
    vec![
        (
            "period1".to_string(),
            epoch_utc_midnight(request.start).to_string(),
        ),
        (
            "period2".to_string(),
            epoch_utc_midnight(request.end).to_string(),
        ),
        ("interval".to_string(), INTERVAL.to_string()),
    ]
}

/// Query parameters for the quote-summary endpoint.
pub fn metadata_query() -> Vec<(String, String)> {
    vec![("modules".to_string(), METADATA_MODULES.to_string())]
}

/// Query parameters for the search endpoint, tuned for news only.
pub fn search_query(symbol: &str) -> Vec<(String, String)> {
    vec![
        ("q".to_string(), symbol.to_string()),
        ("newsCount".to_string(), NEWS_COUNT.to_string()),
        ("quotesCount".to_string(), "0".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn epoch_conversion_is_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        // 2024-01-02T00:00:00Z
        assert_eq!(epoch_utc_midnight(date), 1_704_153_600);
    }

    #[test]
    fn chart_query_carries_range_and_interval() {
        let request = HistoryRequest {
            symbol: "AAPL".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };
        let query = chart_query(&request);
        assert_eq!(query[0].1, "1704153600");
        assert_eq!(query[1].1, "1704412800");
        assert_eq!(query[2], ("interval".to_string(), "1d".to_string()));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let request = HistoryRequest {
            symbol: "AAPL".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(validate_range(&request).is_err());
    }
}
