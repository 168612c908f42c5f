//! End-to-end tests for the collector pipeline over in-memory sources.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use market_data_client::models::news::RawNewsItem;
use news_aggregator::{
    collect::NewsCollector,
    models::NewsQuery,
    sources::{NewsSource, NewsSourceError, StatusSnafu},
};

struct CannedSource {
    name: &'static str,
    items: Vec<RawNewsItem>,
}

#[async_trait]
impl NewsSource for CannedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, _query: &NewsQuery) -> Result<Vec<RawNewsItem>, NewsSourceError> {
        Ok(self.items.clone())
    }
}

struct BrokenSource;

#[async_trait]
impl NewsSource for BrokenSource {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn fetch(&self, _query: &NewsQuery) -> Result<Vec<RawNewsItem>, NewsSourceError> {
        StatusSnafu {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
        .fail()
    }
}

fn item(title: &str, link: &str, publisher: &str, hour: u32) -> RawNewsItem {
    RawNewsItem {
        title: Some(title.to_string()),
        link: Some(link.to_string()),
        summary: Some(
            "A sufficiently long summary that survives repair untouched because it \
             clears the minimum length."
                .to_string(),
        ),
        publisher: Some(publisher.to_string()),
        published_at: Some(Utc.with_ymd_and_hms(2024, 8, 20, hour, 0, 0).unwrap()),
    }
}

fn query() -> NewsQuery {
    NewsQuery {
        ticker: "AAPL".to_string(),
        company_name: "Apple Inc.".to_string(),
    }
}

#[tokio::test]
async fn failed_sources_degrade_instead_of_aborting() {
    let mut collector = NewsCollector::new();
    collector.push_source(Box::new(CannedSource {
        name: "canned",
        items: vec![
            item("First", "https://e.com/1", "Newsroom", 4),
            item("Second", "https://e.com/2", "Newsroom", 2),
        ],
    }));
    collector.push_source(Box::new(BrokenSource));

    let ranked = collector.collect(&query()).await;

    assert_eq!(ranked.sources_ok, 1);
    assert_eq!(ranked.sources_failed, 1);
    assert_eq!(ranked.items.len(), 2);
    assert_eq!(ranked.items[0].title, "First");
}

#[tokio::test]
async fn items_from_all_sources_rank_together() {
    let mut collector = NewsCollector::new();
    collector.push_source(Box::new(CannedSource {
        name: "a",
        items: vec![item("Morning story", "https://e.com/am", "A", 6)],
    }));
    collector.push_source(Box::new(CannedSource {
        name: "b",
        items: vec![item("Evening story", "https://e.com/pm", "B", 18)],
    }));

    let ranked = collector.collect(&query()).await;

    let titles: Vec<&str> = ranked.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Evening story", "Morning story"]);
}

#[tokio::test]
async fn duplicate_articles_keep_the_earlier_source() {
    let mut collector = NewsCollector::new();
    collector.push_source(Box::new(CannedSource {
        name: "primary",
        items: vec![item("Shared", "https://e.com/shared", "Primary", 8)],
    }));
    collector.push_source(Box::new(CannedSource {
        name: "secondary",
        items: vec![
            item("Shared", "https://e.com/shared", "Secondary", 8),
            item("Unique", "https://e.com/unique", "Secondary", 7),
        ],
    }));

    let ranked = collector.collect(&query()).await;

    assert_eq!(ranked.items.len(), 2);
    assert_eq!(ranked.items[0].title, "Shared");
    assert_eq!(ranked.items[0].publisher, "Primary");
    assert_eq!(ranked.items[1].title, "Unique");
}

#[tokio::test]
async fn weak_summaries_are_repaired_on_the_way_out() {
    let mut weak = item("Apple shares on the move", "https://e.com/w", "A", 3);
    weak.summary = Some("Too short.".to_string());

    let mut collector = NewsCollector::new();
    collector.push_source(Box::new(CannedSource {
        name: "canned",
        items: vec![weak],
    }));

    let ranked = collector.collect(&query()).await;

    assert_eq!(
        ranked.items[0].summary,
        "Latest market analysis and trading insights for AAPL. Investors are \
         monitoring key developments and price movements in the stock."
    );
}

#[tokio::test]
async fn an_empty_collector_collects_nothing() {
    let collector = NewsCollector::new();

    let ranked = collector.collect(&query()).await;

    assert!(ranked.is_empty());
    assert_eq!(ranked.sources_ok, 0);
    assert_eq!(ranked.sources_failed, 0);
}
