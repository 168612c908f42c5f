//! A collection of daily bars for a specific symbol.

use serde::{Deserialize, Serialize};

use crate::models::bar::PriceBar;

/// Represents a complete daily price history for a single symbol.
///
/// Bars are ordered by strictly increasing session date with no duplicates;
/// providers sort and de-duplicate on construction, so consumers may rely on
/// the ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The collection of OHLCV bars.
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// The closing-price column, in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// True when the series holds no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn bar(date: NaiveDate, close: f64) -> PriceBar {
        PriceBar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn closes_follow_bar_order() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let series = PriceSeries {
            symbol: "AAPL".to_string(),
            bars: vec![
                bar(start, 185.5),
                bar(start.succ_opt().unwrap(), 186.0),
                bar(start.succ_opt().unwrap().succ_opt().unwrap(), 184.25),
            ],
        };
        assert_eq!(series.closes(), vec![185.5, 186.0, 184.25]);
        assert!(!series.is_empty());
    }
}
