use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Universal parameters for requesting a daily price history from any
/// market data provider.
///
/// This struct is vendor-agnostic and is the standard input for all
/// [`MarketDataProvider`](crate::providers::MarketDataProvider) implementations.
/// The bar interval is fixed at one day; this system renders daily charts
/// only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// The symbol to request (e.g., "AAPL").
    pub symbol: String,

    /// Start of the requested range (inclusive).
    ///
    /// Providers should return bars for sessions on or after this date.
    pub start: NaiveDate,

    /// End of the requested range (exclusive).
    ///
    /// Providers should return bars for sessions strictly before this date.
    pub end: NaiveDate,
}
