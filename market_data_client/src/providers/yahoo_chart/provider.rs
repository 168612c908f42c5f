use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared_utils::{env::get_env_var, http};
use snafu::{OptionExt, ResultExt};
use tracing::debug;

use crate::{
    models::{
        bar::PriceBar, bar_series::PriceSeries, metadata::CompanyMetadata, news::RawNewsItem,
        request_params::HistoryRequest,
    },
    providers::{
        ApiSnafu, ClientBuildSnafu, InternalSnafu, InvalidRateLimitSnafu, MarketDataProvider,
        ProviderError, ProviderInitError, ReqwestSnafu,
        yahoo_chart::{
            params,
            response::{ChartResponse, QuoteSummaryResponse, SearchResponse},
        },
    },
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_REQUESTS_PER_SEC: u32 = 4;

/// Environment variable overriding the API base URL (mirrors, local stubs).
pub const BASE_URL_ENV: &str = "MARKET_DATA_BASE_URL";

/// Construction options for [`YahooChartProvider`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Scheme and host of the API, without a trailing slash.
    pub base_url: String,
    /// User-agent presented on every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Outbound request budget per second.
    pub max_requests_per_sec: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: http::DEFAULT_USER_AGENT.to_string(),
            timeout: http::default_timeout(),
            max_requests_per_sec: DEFAULT_REQUESTS_PER_SEC,
        }
    }
}

/// Market data from the public Yahoo chart/quote-summary/search endpoints.
///
/// Keyless. A direct rate limiter spaces outbound calls so one enriched
/// request (history + metadata + related news) stays inside the budget.
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl YahooChartProvider {
    /// Creates a provider from explicit options.
    pub fn new(options: ClientOptions) -> Result<Self, ProviderInitError> {
        let per_second =
            NonZeroU32::new(options.max_requests_per_sec).context(InvalidRateLimitSnafu {
                requests_per_sec: options.max_requests_per_sec,
            })?;

        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: options.base_url,
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    /// Creates a provider with default options, honoring the
    /// [`BASE_URL_ENV`] override when set.
    pub fn from_env() -> Result<Self, ProviderInitError> {
        let mut options = ClientOptions::default();
        if let Ok(base_url) = get_env_var(BASE_URL_ENV) {
            options.base_url = base_url;
        }
        Self::new(options)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T, ProviderError> {
        self.limiter.until_ready().await;
        debug!(url, "requesting");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu {
                message: format!("HTTP {status}: {body}"),
            }
            .fail();
        }

        response.json::<T>().await.context(ReqwestSnafu)
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    async fn fetch_history(
        &self,
        request: &HistoryRequest,
    ) -> Result<PriceSeries, ProviderError> {
        params::validate_range(request)?;

        let url = format!("{}/v8/finance/chart/{}", self.base_url, request.symbol);
        let payload: ChartResponse = self.get_json(&url, &params::chart_query(request)).await?;
        series_from_chart(&request.symbol, payload)
    }

    async fn fetch_metadata(&self, symbol: &str) -> Result<CompanyMetadata, ProviderError> {
        let url = format!("{}/v10/finance/quoteSummary/{symbol}", self.base_url);
        let payload: QuoteSummaryResponse =
            self.get_json(&url, &params::metadata_query()).await?;
        metadata_from_summary(payload)
    }

    async fn fetch_related_news(&self, symbol: &str) -> Result<Vec<RawNewsItem>, ProviderError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let payload: SearchResponse = self.get_json(&url, &params::search_query(symbol)).await?;
        Ok(news_from_search(payload))
    }
}

/// Converts a chart payload into an ordered [`PriceSeries`].
///
/// Rows with a hole in any OHLC column are dropped; missing volume becomes 0.
/// Bars are labeled with the exchange-local session date when the payload
/// names the exchange timezone, the UTC date otherwise.
fn series_from_chart(symbol: &str, payload: ChartResponse) -> Result<PriceSeries, ProviderError> {
    if let Some(error) = payload.chart.error {
        return ApiSnafu {
            message: error.message(),
        }
        .fail();
    }

    let result = payload
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.swap_remove(0))
            }
        })
        .context(InternalSnafu {
            message: "chart response carried neither result nor error",
        })?;

    let tz: Option<Tz> = result
        .meta
        .exchange_timezone_name
        .as_deref()
        .and_then(|name| name.parse().ok());

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (index, &epoch) in result.timestamp.iter().enumerate() {
        let row = (
            column(&quote.open, index),
            column(&quote.high, index),
            column(&quote.low, index),
            column(&quote.close, index),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = row else {
            debug!(index, "skipping bar with incomplete OHLC");
            continue;
        };
        let Some(date) = session_date(epoch, tz) else {
            debug!(index, epoch, "skipping bar with unrepresentable timestamp");
            continue;
        };
        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume: column(&quote.volume, index).unwrap_or(0),
        });
    }

    bars.sort_by_key(|bar| bar.date);
    bars.dedup_by_key(|bar| bar.date);

    Ok(PriceSeries {
        symbol: symbol.to_string(),
        bars,
    })
}

fn column<T: Copy>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).copied().flatten()
}

/// The trading-session date for an epoch timestamp, exchange-local when a
/// zone is known.
fn session_date(epoch: i64, tz: Option<Tz>) -> Option<NaiveDate> {
    let utc = DateTime::<Utc>::from_timestamp(epoch, 0)?;
    Some(match tz {
        Some(tz) => utc.with_timezone(&tz).date_naive(),
        None => utc.date_naive(),
    })
}

fn metadata_from_summary(payload: QuoteSummaryResponse) -> Result<CompanyMetadata, ProviderError> {
    if let Some(error) = payload.quote_summary.error {
        return ApiSnafu {
            message: error.message(),
        }
        .fail();
    }

    let result = payload
        .quote_summary
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.swap_remove(0))
            }
        })
        .context(InternalSnafu {
            message: "quote summary carried neither result nor error",
        })?;

    let profile = result.asset_profile.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let price = result.price.unwrap_or_default();

    Ok(CompanyMetadata {
        name: price.long_name,
        sector: profile.sector,
        market_cap: price.market_cap.and_then(|n| n.raw).map(|raw| raw as u64),
        pe_ratio: detail.trailing_pe.and_then(|n| n.raw),
        beta: detail.beta.and_then(|n| n.raw),
        dividend_yield: detail.dividend_yield.and_then(|n| n.raw),
        business_summary: profile.long_business_summary,
    })
}

fn news_from_search(payload: SearchResponse) -> Vec<RawNewsItem> {
    payload
        .news
        .into_iter()
        .map(|item| RawNewsItem {
            title: item.title,
            link: item.link,
            summary: item.summary,
            publisher: item.publisher,
            published_at: item
                .provider_publish_time
                .and_then(|epoch| DateTime::<Utc>::from_timestamp(epoch, 0)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_payload(body: &str) -> ChartResponse {
        serde_json::from_str(body).expect("chart fixture should deserialize")
    }

    #[test]
    fn chart_rows_become_session_dated_bars() {
        // Two NYSE sessions: 2024-01-02 and 2024-01-03, both 14:30 UTC opens.
        let payload = chart_payload(
            r#"{
                "chart": {
                    "result": [{
                        "meta": {
                            "symbol": "AAPL",
                            "exchangeTimezoneName": "America/New_York"
                        },
                        "timestamp": [1704205800, 1704292200],
                        "indicators": {
                            "quote": [{
                                "open": [187.15, 184.22],
                                "high": [188.44, 185.88],
                                "low": [183.89, 183.43],
                                "close": [185.64, 184.25],
                                "volume": [82488700, 58414500]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        );

        let series = series_from_chart("AAPL", payload).unwrap();
        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.bars.len(), 2);
        assert_eq!(
            series.bars[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(
            series.bars[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        assert_eq!(series.bars[0].close, 185.64);
        assert_eq!(series.bars[1].volume, 58_414_500);
    }

    #[test]
    fn rows_with_null_ohlc_are_skipped() {
        let payload = chart_payload(
            r#"{
                "chart": {
                    "result": [{
                        "meta": {"symbol": "AAPL", "exchangeTimezoneName": "America/New_York"},
                        "timestamp": [1704205800, 1704292200],
                        "indicators": {
                            "quote": [{
                                "open": [187.15, null],
                                "high": [188.44, 185.88],
                                "low": [183.89, 183.43],
                                "close": [185.64, 184.25],
                                "volume": [82488700, null]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        );

        let series = series_from_chart("AAPL", payload).unwrap();
        assert_eq!(series.bars.len(), 1);
        assert_eq!(series.bars[0].close, 185.64);
    }

    #[test]
    fn chart_error_body_surfaces_as_api_error() {
        let payload = chart_payload(
            r#"{
                "chart": {
                    "result": null,
                    "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
                }
            }"#,
        );

        let err = series_from_chart("ZZZZ", payload).unwrap_err();
        assert!(matches!(err, ProviderError::Api { .. }));
        assert!(err.to_string().contains("No data found"));
    }

    #[test]
    fn quote_summary_maps_sparse_fields() {
        let payload: QuoteSummaryResponse = serde_json::from_str(
            r#"{
                "quoteSummary": {
                    "result": [{
                        "assetProfile": {
                            "sector": "Technology",
                            "longBusinessSummary": "Apple Inc. designs smartphones."
                        },
                        "summaryDetail": {
                            "trailingPE": {"raw": 28.91, "fmt": "28.91"},
                            "dividendYield": {"raw": 0.0052, "fmt": "0.52%"}
                        },
                        "price": {
                            "longName": "Apple Inc.",
                            "marketCap": {"raw": 2890000000000.0, "fmt": "2.89T"}
                        }
                    }],
                    "error": null
                }
            }"#,
        )
        .unwrap();

        let metadata = metadata_from_summary(payload).unwrap();
        assert_eq!(metadata.name.as_deref(), Some("Apple Inc."));
        assert_eq!(metadata.sector.as_deref(), Some("Technology"));
        assert_eq!(metadata.market_cap, Some(2_890_000_000_000));
        assert_eq!(metadata.pe_ratio, Some(28.91));
        assert_eq!(metadata.beta, None);
        assert!(!metadata.is_empty());
    }

    #[test]
    fn search_news_keeps_absent_fields_absent() {
        let payload: SearchResponse = serde_json::from_str(
            r#"{
                "news": [
                    {
                        "title": "Apple unveils results",
                        "link": "https://example.com/apple",
                        "publisher": "Newswire",
                        "providerPublishTime": 1704205800
                    },
                    {
                        "title": "Untimed story",
                        "link": "https://example.com/untimed"
                    }
                ]
            }"#,
        )
        .unwrap();

        let items = news_from_search(payload);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].publisher.as_deref(), Some("Newswire"));
        assert_eq!(
            items[0].published_at,
            DateTime::<Utc>::from_timestamp(1_704_205_800, 0)
        );
        assert!(items[1].publisher.is_none());
        assert!(items[1].published_at.is_none());
        assert!(items[1].summary.is_none());
    }
}
