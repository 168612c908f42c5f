//! Canonical in-memory representation of a daily price bar (OHLCV).
//!
//! This struct is the standard output for all [`MarketDataProvider`](crate::providers::MarketDataProvider)
//! implementations, regardless of the upstream vendor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily OHLCV bar for a given trading session.
///
/// This struct is vendor-agnostic and is used throughout the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// The exchange-local session date for this bar.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the session.
    pub high: f64,

    /// Lowest price during the session.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the session. Zero when the vendor omits it.
    pub volume: u64,
}
