use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use market_data_client::{
    models::request_params::HistoryRequest,
    providers::{MarketDataProvider, yahoo_chart::YahooChartProvider},
};
use news_aggregator::{
    collect::NewsCollector,
    sources::{provider_feed::ProviderFeedSource, syndication::SyndicationSource},
};
use serde::Serialize;
use stock_analyzer::{
    config::{self, AnalyzerConfig},
    indicators::{self, IndicatorRequest},
    orchestrator::{AnalysisRequest, StockAnalysis, StockOrchestrator},
    ticker::validate_ticker,
};
use tracing::warn;

#[derive(Parser)]
#[command(
    version,
    about = "Single-ticker stock analysis: history, indicators, company profile and news"
)]
struct Cli {
    /// Ticker symbol to analyze (e.g. AAPL).
    ticker: String,

    /// First session to include (YYYY-MM-DD).
    #[arg(long)]
    start: NaiveDate,

    /// First session to exclude (YYYY-MM-DD).
    #[arg(long)]
    end: NaiveDate,

    /// Compute the 20 and 50 bar simple moving averages.
    #[arg(long)]
    ma: bool,

    /// Compute the 14 bar RSI.
    #[arg(long)]
    rsi: bool,

    /// Compute the MACD line, signal and histogram.
    #[arg(long)]
    macd: bool,

    /// Compare range performance against another symbol (e.g. SPY).
    #[arg(long, value_name = "SYMBOL")]
    benchmark: Option<String>,

    /// Config file; falls back to $STOCK_ANALYZER_CONFIG, then built-ins.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Printed report: the analysis itself plus the optional benchmark block.
#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    analysis: StockAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark: Option<BenchmarkComparison>,
}

/// Range performance of the benchmark symbol next to the analyzed one.
#[derive(Serialize)]
struct BenchmarkComparison {
    symbol: String,
    change_pct: Option<f64>,
    /// Analyzed symbol's change minus the benchmark's, in points.
    outperformance_pct: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_analyzer=info,market_data_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match config::resolve_config_path(cli.config.clone()) {
        Some(path) => config::load_config_path(&path)?,
        None => AnalyzerConfig::default(),
    };

    let provider = Arc::new(YahooChartProvider::new(config.client_options())?);
    let collector = build_collector(&config, provider.clone());
    let orchestrator = StockOrchestrator::new(provider.clone(), collector);

    let request = AnalysisRequest {
        ticker: cli.ticker.clone(),
        start: cli.start,
        end: cli.end,
        indicators: indicator_requests(&cli),
    };
    let analysis = orchestrator.fetch_and_enrich(&request).await?;

    let benchmark = match &cli.benchmark {
        Some(symbol) => compare_benchmark(provider.as_ref(), symbol, &cli, &analysis).await,
        None => None,
    };

    let report = Report {
        analysis,
        benchmark,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Indicator families selected by the flags, in a fixed display order.
fn indicator_requests(cli: &Cli) -> Vec<IndicatorRequest> {
    let mut requests = Vec::new();
    if cli.ma {
        requests.push(IndicatorRequest::MovingAverages);
    }
    if cli.rsi {
        requests.push(IndicatorRequest::Rsi);
    }
    if cli.macd {
        requests.push(IndicatorRequest::Macd);
    }
    requests
}

/// Registers the provider-backed feed and, when it can be built, the
/// syndicated feed. A source that cannot be built is skipped, not fatal.
fn build_collector(config: &AnalyzerConfig, provider: Arc<YahooChartProvider>) -> NewsCollector {
    let mut collector = NewsCollector::new();
    collector.push_source(Box::new(ProviderFeedSource::new(provider)));
    match SyndicationSource::new(config.feed_options()) {
        Ok(source) => collector.push_source(Box::new(source)),
        Err(error) => warn!(%error, "syndicated feed source unavailable, continuing without it"),
    }
    collector
}

/// Fetches the benchmark's history and compares range performance.
///
/// The benchmark is enrichment: any failure here logs a warning and the
/// report simply omits the block.
async fn compare_benchmark(
    provider: &(dyn MarketDataProvider + Send + Sync),
    symbol: &str,
    cli: &Cli,
    analysis: &StockAnalysis,
) -> Option<BenchmarkComparison> {
    let symbol = symbol.trim().to_ascii_uppercase();
    if !validate_ticker(&symbol) {
        warn!(%symbol, "invalid benchmark symbol, skipping comparison");
        return None;
    }

    let request = HistoryRequest {
        symbol: symbol.clone(),
        start: cli.start,
        end: cli.end,
    };
    match provider.fetch_history(&request).await {
        Ok(series) if !series.is_empty() => {
            let change_pct = indicators::percent_change(&series.closes());
            let outperformance_pct = match (analysis.summary.change_pct, change_pct) {
                (Some(own), Some(bench)) => Some(own - bench),
                _ => None,
            };
            Some(BenchmarkComparison {
                symbol,
                change_pct,
                outperformance_pct,
            })
        }
        Ok(_) => {
            warn!(%symbol, "no benchmark data for the range, skipping comparison");
            None
        }
        Err(error) => {
            warn!(%symbol, %error, "benchmark fetch failed, skipping comparison");
            None
        }
    }
}
