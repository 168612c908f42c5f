//! Fan-out over news sources with per-source failure isolation.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    aggregate::aggregate,
    models::{NewsQuery, RankedNews},
    sources::NewsSource,
};

/// Runs every registered [`NewsSource`] for a query and folds their batches
/// into one ranked list.
///
/// A failing source is logged and degraded to an empty batch rather than
/// failing the collection; the counters on [`RankedNews`] tell callers how
/// many sources delivered.
#[derive(Default)]
pub struct NewsCollector {
    sources: Vec<Box<dyn NewsSource + Send + Sync>>,
}

impl NewsCollector {
    /// Collector with no sources. `collect` on it returns an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source.
    ///
    /// Registration order matters downstream: under equal timestamps and for
    /// duplicate articles, earlier sources win.
    pub fn push_source(&mut self, source: Box<dyn NewsSource + Send + Sync>) {
        self.sources.push(source);
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Fetches from every source concurrently and aggregates the batches.
    pub async fn collect(&self, query: &NewsQuery) -> RankedNews {
        let outcomes = join_all(self.sources.iter().map(|source| source.fetch(query))).await;

        let mut batches = Vec::with_capacity(outcomes.len());
        let mut sources_ok = 0;
        let mut sources_failed = 0;

        for (source, outcome) in self.sources.iter().zip(outcomes) {
            match outcome {
                Ok(batch) => {
                    debug!(
                        source = source.name(),
                        count = batch.len(),
                        "news source delivered"
                    );
                    sources_ok += 1;
                    batches.push(batch);
                }
                Err(error) => {
                    warn!(
                        source = source.name(),
                        %error,
                        "news source failed, continuing without it"
                    );
                    sources_failed += 1;
                    batches.push(Vec::new());
                }
            }
        }

        RankedNews {
            items: aggregate(&batches, &query.ticker),
            sources_ok,
            sources_failed,
        }
    }
}
