//! News source backed by a market data provider's related-news lookup.

use std::sync::Arc;

use async_trait::async_trait;
use market_data_client::{models::news::RawNewsItem, providers::MarketDataProvider};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::NewsQuery,
    sources::{NewsSource, NewsSourceError, ProviderSnafu},
};

/// Most items kept from one provider lookup.
const PROVIDER_ITEM_CAP: usize = 10;

/// Adapter that surfaces a [`MarketDataProvider`]'s related-news lookup as a
/// [`NewsSource`].
///
/// Items are passed through untouched apart from the cap; validity filtering
/// and summary repair happen downstream in the aggregation pipeline.
pub struct ProviderFeedSource {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
}

impl ProviderFeedSource {
    /// Wraps an already-constructed provider.
    pub fn new(provider: Arc<dyn MarketDataProvider + Send + Sync>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl NewsSource for ProviderFeedSource {
    fn name(&self) -> &'static str {
        "provider-feed"
    }

    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawNewsItem>, NewsSourceError> {
        let mut items = self
            .provider
            .fetch_related_news(&query.ticker)
            .await
            .context(ProviderSnafu)?;

        if items.len() > PROVIDER_ITEM_CAP {
            items.truncate(PROVIDER_ITEM_CAP);
        }

        debug!(ticker = %query.ticker, count = items.len(), "provider feed fetched");
        Ok(items)
    }
}
