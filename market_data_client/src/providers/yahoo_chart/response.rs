use serde::Deserialize;

/// Error object the API attaches to a failed envelope.
#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl ApiErrorBody {
    /// The most specific message available.
    pub fn message(&self) -> String {
        self.description
            .clone()
            .or_else(|| self.code.clone())
            .unwrap_or_else(|| "Unknown API error".to_string())
    }
}

// ---- chart v8 ----

#[derive(Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartMeta {
    pub symbol: Option<String>,
    /// IANA zone the exchange trades in, e.g. "America/New_York".
    #[serde(rename = "exchangeTimezoneName")]
    pub exchange_timezone_name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

/// Column-oriented OHLCV arrays, index-aligned with `timestamp`.
///
/// Individual entries are null for halted or partial sessions, so every
/// column is a vector of options.
#[derive(Deserialize, Debug, Default)]
pub struct ChartQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

// ---- quoteSummary v10 ----

#[derive(Deserialize, Debug)]
pub struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryEnvelope,
}

#[derive(Deserialize, Debug)]
pub struct QuoteSummaryEnvelope {
    pub result: Option<Vec<QuoteSummaryResult>>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuoteSummaryResult {
    #[serde(rename = "assetProfile")]
    pub asset_profile: Option<AssetProfile>,
    #[serde(rename = "summaryDetail")]
    pub summary_detail: Option<SummaryDetail>,
    pub price: Option<PriceModule>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AssetProfile {
    pub sector: Option<String>,
    #[serde(rename = "longBusinessSummary")]
    pub long_business_summary: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<Num>,
    pub beta: Option<Num>,
    #[serde(rename = "dividendYield")]
    pub dividend_yield: Option<Num>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PriceModule {
    #[serde(rename = "longName")]
    pub long_name: Option<String>,
    #[serde(rename = "marketCap")]
    pub market_cap: Option<Num>,
}

/// The API wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`; only `raw`
/// matters here.
#[derive(Deserialize, Debug, Default)]
pub struct Num {
    pub raw: Option<f64>,
}

// ---- search v1 ----

#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    #[serde(default)]
    pub news: Vec<SearchNewsItem>,
}

#[derive(Deserialize, Debug)]
pub struct SearchNewsItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub publisher: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "providerPublishTime")]
    pub provider_publish_time: Option<i64>,
}
