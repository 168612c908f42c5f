//! Syndicated RSS search feed adapter (Google News style).
//!
//! The feed is fetched with a browser user agent and parsed leniently: a
//! malformed entry is skipped rather than failing the whole fetch. Feeds in
//! the wild drop tags freely, so absent fields get the documented fallbacks
//! while present-but-empty fields are kept empty for the downstream repair
//! step to deal with.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_data_client::models::news::RawNewsItem;
use reqwest::Client;
use snafu::{ResultExt, ensure};
use tracing::debug;

use crate::{
    models::NewsQuery,
    sanitize::decode_entities,
    sources::{
        ClientBuildSnafu, NewsSource, NewsSourceError, NewsSourceInitError, RequestSnafu,
        StatusSnafu,
    },
};

/// Most items kept from one feed fetch.
const FEED_ITEM_CAP: usize = 8;

/// Publisher recorded when an entry names no source.
const FALLBACK_PUBLISHER: &str = "Google News";

/// Default search endpoint.
pub const DEFAULT_FEED_BASE_URL: &str = "https://news.google.com/rss/search";

/// Connection settings for a [`SyndicationSource`].
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Search endpoint the query string is appended to.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_BASE_URL.to_string(),
            user_agent: shared_utils::http::DEFAULT_USER_AGENT.to_string(),
            timeout: shared_utils::http::default_timeout(),
        }
    }
}

/// News source backed by a syndicated RSS search feed.
pub struct SyndicationSource {
    client: Client,
    base_url: String,
}

impl SyndicationSource {
    /// Builds the source with its own HTTP client.
    pub fn new(options: FeedOptions) -> Result<Self, NewsSourceInitError> {
        let client = Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: options.base_url,
        })
    }

    /// Search URL for the query.
    ///
    /// Terms are joined with literal `+` signs, the convention this feed
    /// expects, rather than percent-encoded.
    fn feed_url(&self, query: &NewsQuery) -> String {
        let company = query.company_name.replace(' ', "+");
        format!(
            "{}?q={}+stock+OR+{}&hl=en-US&gl=US&ceid=US:en",
            self.base_url, query.ticker, company
        )
    }
}

#[async_trait]
impl NewsSource for SyndicationSource {
    fn name(&self) -> &'static str {
        "syndication"
    }

    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawNewsItem>, NewsSourceError> {
        let url = self.feed_url(query);
        debug!(url = %url, "fetching syndicated feed");

        let response = self.client.get(&url).send().await.context(RequestSnafu)?;
        ensure!(
            response.status().is_success(),
            StatusSnafu {
                status: response.status()
            }
        );

        let body = response.text().await.context(RequestSnafu)?;
        let items = parse_feed(&body, &query.ticker);
        debug!(ticker = %query.ticker, count = items.len(), "syndicated feed parsed");
        Ok(items)
    }
}

/// Parses a feed body into raw items.
///
/// The entry cap applies to raw `<item>` blocks, before any block is
/// rejected for missing fields.
fn parse_feed(body: &str, ticker: &str) -> Vec<RawNewsItem> {
    item_blocks(body)
        .into_iter()
        .take(FEED_ITEM_CAP)
        .filter_map(|block| item_from_block(block, ticker))
        .collect()
}

/// Builds one item from the inner text of an `<item>` block.
///
/// Title and link are mandatory; a block missing either is dropped here.
/// Everything else falls back: pub dates that are absent or unparseable
/// become the fetch time, an absent description becomes a ticker-specific
/// stock sentence, an absent source attribution becomes the feed's name.
fn item_from_block(block: &str, ticker: &str) -> Option<RawNewsItem> {
    let title = tag_text(block, "title")?.trim().to_string();
    let link = tag_text(block, "link")?.trim().to_string();
    if title.is_empty() || link.is_empty() {
        return None;
    }

    let published_at = tag_text(block, "pubDate")
        .and_then(|text| parse_pub_date(&text))
        .unwrap_or_else(Utc::now);

    let summary = match tag_text(block, "description") {
        Some(text) => text.trim().to_string(),
        None => format!("Latest news about {ticker} from reliable financial sources."),
    };

    let publisher = tag_text(block, "source").unwrap_or_else(|| FALLBACK_PUBLISHER.to_string());

    Some(RawNewsItem {
        title: Some(title),
        link: Some(link),
        summary: Some(summary),
        publisher: Some(publisher),
        published_at: Some(published_at),
    })
}

/// Timestamp formats feeds actually emit: RFC 2822 first, RFC 3339 second.
fn parse_pub_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Splits a feed body into the inner text of each `<item>` element.
fn item_blocks(body: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("<item") {
        let after = &rest[start + "<item".len()..];
        // Longer tag names share the prefix; require a real element.
        if !after.starts_with('>') && !after.starts_with(char::is_whitespace) {
            rest = after;
            continue;
        }
        let Some(open_end) = after.find('>') else {
            break;
        };
        let inner = &after[open_end + 1..];
        let Some(close) = inner.find("</item>") else {
            break;
        };
        blocks.push(&inner[..close]);
        rest = &inner[close + "</item>".len()..];
    }

    blocks
}

/// Extracts the text of the first `<name>` element in a block.
///
/// Tolerates attributes on the opening tag, unwraps one CDATA section and
/// decodes common entities. Returns `None` when the tag is absent and
/// `Some("")` when it is present but empty or self-closing.
fn tag_text(block: &str, name: &str) -> Option<String> {
    let open = format!("<{name}");
    let mut rest = block;

    loop {
        let start = rest.find(&open)?;
        let after = &rest[start + open.len()..];
        match after.chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => {
                let open_end = after.find('>')?;
                if after[..open_end].ends_with('/') {
                    return Some(String::new());
                }
                let inner = &after[open_end + 1..];
                let close = format!("</{name}>");
                let end = inner.find(&close)?;
                return Some(unwrap_cdata(&inner[..end]));
            }
            _ => rest = after,
        }
    }
}

/// Strips one CDATA wrapper if present, then decodes entities.
fn unwrap_cdata(text: &str) -> String {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
        .unwrap_or(trimmed);
    decode_entities(inner)
}
