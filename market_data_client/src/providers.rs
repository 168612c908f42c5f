//! Provider abstraction for market data sources.
//!
//! This module defines the [`MarketDataProvider`] trait, which serves as a unified
//! interface for fetching price history, company metadata, and related news
//! from any market data vendor.
//!
//! Each concrete provider implementation (such as the bundled Yahoo chart
//! client) should implement [`MarketDataProvider`] to handle vendor-specific
//! endpoints, decoding, and validation.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn MarketDataProvider`) so the orchestration layer can select a provider
//! at runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_client::models::{
//!     bar_series::PriceSeries,
//!     metadata::CompanyMetadata,
//!     news::RawNewsItem,
//!     request_params::HistoryRequest,
//! };
//! use market_data_client::providers::{MarketDataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl MarketDataProvider for MyProvider {
//!     async fn fetch_history(
//!         &self,
//!         request: &HistoryRequest,
//!     ) -> Result<PriceSeries, ProviderError> {
//!         Ok(PriceSeries { symbol: request.symbol.clone(), bars: vec![] })
//!     }
//!
//!     async fn fetch_metadata(
//!         &self,
//!         _symbol: &str,
//!     ) -> Result<CompanyMetadata, ProviderError> {
//!         Ok(CompanyMetadata::default())
//!     }
//!
//!     async fn fetch_related_news(
//!         &self,
//!         _symbol: &str,
//!     ) -> Result<Vec<RawNewsItem>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```
//!

pub mod yahoo_chart;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{
    bar_series::PriceSeries, metadata::CompanyMetadata, news::RawNewsItem,
    request_params::HistoryRequest,
};

/// Trait for fetching market data for a single symbol.
///
/// Implement this trait for each concrete data vendor. All three operations
/// are best-effort from the caller's perspective: any of them may fail or
/// return partial data, and callers decide which failures abort a request
/// and which degrade.
#[async_trait]
pub trait MarketDataProvider {
    /// Fetches the daily price history for the given request.
    ///
    /// # Arguments
    ///
    /// * `request` - The symbol and the date range to fetch.
    ///
    /// # Returns
    ///
    /// * `Ok(PriceSeries)` - The bars found for the range; may be empty.
    /// * `Err(ProviderError)` - If the request fails.
    async fn fetch_history(&self, request: &HistoryRequest)
    -> Result<PriceSeries, ProviderError>;

    /// Fetches company profile and valuation fields for the symbol.
    ///
    /// Coverage is sparse by nature; absent fields are not an error.
    async fn fetch_metadata(&self, symbol: &str) -> Result<CompanyMetadata, ProviderError>;

    /// Fetches the news items the vendor relates to the symbol, in the
    /// vendor's own order.
    async fn fetch_related_news(&self, symbol: &str) -> Result<Vec<RawNewsItem>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// the configured request budget is unusable
    #[snafu(display("Invalid rate limit: {requests_per_sec} requests per second"))]
    InvalidRateLimit {
        requests_per_sec: u32,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `MarketDataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., an
    /// unknown symbol or a throttled response).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}
