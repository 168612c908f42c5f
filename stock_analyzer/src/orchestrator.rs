//! The fetch-and-enrich flow behind one dashboard request.
//!
//! Price history is load-bearing: if the symbol fails validation, the
//! provider errors out or the range comes back empty, the whole request
//! fails. Everything else is enrichment. Metadata and news lookups that fail
//! degrade to their empty forms and the analysis still succeeds.

use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use market_data_client::{
    models::{bar_series::PriceSeries, metadata::CompanyMetadata, request_params::HistoryRequest},
    providers::{MarketDataProvider, ProviderError},
};
use news_aggregator::{
    collect::NewsCollector,
    models::{NewsQuery, RankedNews},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    indicators::{
        self, IndicatorKind, IndicatorRequest, MA_LONG_WINDOW, MA_SHORT_WINDOW, MACD_FAST_SPAN,
        MACD_SIGNAL_SPAN, MACD_SLOW_SPAN, RSI_WINDOW, RsiZone,
    },
    ticker::validate_ticker,
};

/// One dashboard request: a symbol, a session range and the indicator
/// families to compute.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Symbol as entered; it is trimmed and uppercased before validation.
    pub ticker: String,
    /// First session to include.
    pub start: NaiveDate,
    /// First session to exclude.
    pub end: NaiveDate,
    /// Indicator families to compute over the fetched closes.
    pub indicators: Vec<IndicatorRequest>,
}

/// Headline numbers for the fetched range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Close of the latest bar.
    pub last_close: f64,
    /// First-close to last-close change over the range, in percent.
    pub change_pct: Option<f64>,
    /// Highest trade of the range.
    pub period_high: f64,
    /// Lowest trade of the range.
    pub period_low: f64,
    /// Mean daily volume.
    pub avg_volume: f64,
    /// Latest RSI reading, when RSI was computed and warmed up.
    pub last_rsi: Option<f64>,
    /// Zone of the latest RSI reading.
    pub rsi_zone: Option<RsiZone>,
}

/// Everything a dashboard needs for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct StockAnalysis {
    /// The fetched session bars.
    pub series: PriceSeries,
    /// Computed indicator series, keyed in request order, each aligned with
    /// the bars.
    pub indicators: IndexMap<IndicatorKind, Vec<Option<f64>>>,
    /// Company profile, empty when the lookup degraded.
    pub metadata: CompanyMetadata,
    /// Ranked news with per-source delivery counters.
    pub news: RankedNews,
    /// Headline numbers over the range.
    pub summary: SeriesSummary,
}

/// Failures that abort an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The symbol failed validation before any network call.
    #[error("Invalid ticker format: '{ticker}'")]
    InvalidTicker { ticker: String },

    /// The provider answered but had no bars for the range.
    #[error("No data found for ticker '{ticker}'")]
    NoData { ticker: String },

    /// The history call itself failed.
    #[error("Market data request failed: {source}")]
    Upstream {
        #[from]
        source: ProviderError,
    },
}

/// Ties a market data provider and a news collector into one enriched fetch.
///
/// Both collaborators are injected, so a deployment without news sources
/// simply hands over an empty collector and still gets prices, indicators
/// and metadata.
pub struct StockOrchestrator {
    market_data: Arc<dyn MarketDataProvider + Send + Sync>,
    news: NewsCollector,
}

impl StockOrchestrator {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider + Send + Sync>,
        news: NewsCollector,
    ) -> Self {
        Self { market_data, news }
    }

    /// Runs the full flow for one request.
    pub async fn fetch_and_enrich(
        &self,
        request: &AnalysisRequest,
    ) -> Result<StockAnalysis, AnalysisError> {
        let ticker = request.ticker.trim().to_ascii_uppercase();
        if !validate_ticker(&ticker) {
            return Err(AnalysisError::InvalidTicker { ticker });
        }

        let history = HistoryRequest {
            symbol: ticker.clone(),
            start: request.start,
            end: request.end,
        };
        let series = self.market_data.fetch_history(&history).await?;
        if series.is_empty() {
            return Err(AnalysisError::NoData { ticker });
        }
        info!(ticker = %ticker, bars = series.bars.len(), "history fetched");

        let metadata = match self.market_data.fetch_metadata(&ticker).await {
            Ok(metadata) => metadata,
            Err(error) => {
                warn!(ticker = %ticker, %error, "metadata lookup failed, continuing without it");
                CompanyMetadata::default()
            }
        };

        // News search works better on the company name when we know it.
        let company_name = metadata.name.clone().unwrap_or_else(|| ticker.clone());
        let news = self
            .news
            .collect(&NewsQuery {
                ticker: ticker.clone(),
                company_name,
            })
            .await;

        let closes = series.closes();
        let mut computed: IndexMap<IndicatorKind, Vec<Option<f64>>> = IndexMap::new();
        for family in &request.indicators {
            match family {
                IndicatorRequest::MovingAverages => {
                    computed.insert(IndicatorKind::Ma20, indicators::sma(&closes, MA_SHORT_WINDOW));
                    computed.insert(IndicatorKind::Ma50, indicators::sma(&closes, MA_LONG_WINDOW));
                }
                IndicatorRequest::Rsi => {
                    computed.insert(IndicatorKind::Rsi, indicators::rsi(&closes, RSI_WINDOW));
                }
                IndicatorRequest::Macd => {
                    let macd =
                        indicators::macd(&closes, MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN);
                    computed.insert(IndicatorKind::MacdLine, wrap(macd.line));
                    computed.insert(IndicatorKind::MacdSignal, wrap(macd.signal));
                    computed.insert(IndicatorKind::MacdHistogram, wrap(macd.histogram));
                }
            }
        }

        let summary = summarize(&series, &computed);

        Ok(StockAnalysis {
            series,
            indicators: computed,
            metadata,
            news,
            summary,
        })
    }
}

/// Uniform value shape for the indicator map; the EMA family has no warm-up
/// gaps but shares the optional form.
fn wrap(values: Vec<f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}

/// Headline numbers over the fetched bars. An empty series summarizes to
/// zeros, though callers reject empty history before getting here.
fn summarize(
    series: &PriceSeries,
    computed: &IndexMap<IndicatorKind, Vec<Option<f64>>>,
) -> SeriesSummary {
    let bars = &series.bars;
    let Some(last_bar) = bars.last() else {
        return SeriesSummary {
            last_close: 0.0,
            change_pct: None,
            period_high: 0.0,
            period_low: 0.0,
            avg_volume: 0.0,
            last_rsi: None,
            rsi_zone: None,
        };
    };

    let last_close = last_bar.close;
    // The last close is within the last bar's range, so it is a safe seed.
    let period_high = bars.iter().map(|bar| bar.high).fold(last_close, f64::max);
    let period_low = bars.iter().map(|bar| bar.low).fold(last_close, f64::min);
    let avg_volume = bars.iter().map(|bar| bar.volume as f64).sum::<f64>() / bars.len() as f64;

    let last_rsi = computed
        .get(&IndicatorKind::Rsi)
        .and_then(|values| values.last().copied().flatten());

    SeriesSummary {
        last_close,
        change_pct: indicators::percent_change(&series.closes()),
        period_high,
        period_low,
        avg_volume,
        last_rsi,
        rsi_zone: last_rsi.map(indicators::rsi_zone),
    }
}
