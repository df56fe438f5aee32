//! Search service: query both sources, merge with user entries, order.

mod debounce;
mod filter;

use std::sync::Arc;

use tracing::{info, warn};

use crate::client::{ArxivSource, CrossRefSource, PaperClient, PaperSource};
use crate::config::Config;
use crate::error::SearchResult;
use crate::models::{Paper, SortOrder};
use crate::store::EntryStore;

pub use debounce::{Debouncer, SearchUpdate};
pub use filter::{filter_papers, merge_results, sort_papers};

/// Runs a query against every source and the user's entries.
#[derive(Clone)]
pub struct Searcher {
    sources: Vec<Arc<dyn PaperSource>>,
    store: Arc<EntryStore>,
    limit: u32,
    sort_order: SortOrder,
}

impl Searcher {
    /// Build a searcher over explicit sources.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn PaperSource>>, store: Arc<EntryStore>, limit: u32) -> Self {
        Self { sources, store, limit, sort_order: SortOrder::default() }
    }

    /// Build the CrossRef + arXiv searcher described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = PaperClient::new(config)?;
        let sources: Vec<Arc<dyn PaperSource>> = vec![
            Arc::new(CrossRefSource::new(client.clone())),
            Arc::new(ArxivSource::new(client)),
        ];
        let store = Arc::new(EntryStore::new(config.store_path.clone()));

        Ok(Self::new(sources, store, config.limit).with_sort_order(config.sort_order))
    }

    /// Set the ordering of merged results.
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Search every source concurrently and merge with user entries.
    ///
    /// A blank query returns no results without touching the network. If any
    /// source fails the whole search fails.
    ///
    /// # Errors
    ///
    /// Returns the first source or store failure.
    pub async fn search(&self, query: &str) -> SearchResult<Vec<Paper>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let limit = self.limit;
        let fetches = self.sources.iter().map(|source| async move {
            source.search(query, limit).await.inspect_err(|e| {
                warn!(source = %source.source(), query, error = %e, "Source search failed");
            })
        });

        let batches = futures::future::try_join_all(fetches).await?;
        let remote: Vec<Paper> = batches.into_iter().flatten().collect();
        let user = self.store.load().await?;

        let mut results = merge_results(remote, user, query);
        sort_papers(&mut results, self.sort_order);

        info!(query, count = results.len(), "Search finished");
        Ok(results)
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("sources", &self.sources.iter().map(|s| s.source()).collect::<Vec<_>>())
            .field("store", &self.store.path())
            .field("limit", &self.limit)
            .field("sort_order", &self.sort_order)
            .finish()
    }
}
