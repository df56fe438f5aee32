//! arXiv `/query` search.

use super::{PaperClient, PaperSource};
use crate::error::{ClientError, ClientResult};
use crate::models::{ArxivFeed, Paper, Source};

impl PaperClient {
    /// Search arXiv across all fields.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, a malformed
    /// feed, or an arXiv error report.
    pub async fn search_arxiv(&self, query: &str, limit: u32) -> ClientResult<Vec<Paper>> {
        let url = format!("{}/query", self.arxiv_api_url);

        let params = vec![
            ("search_query".to_string(), format!("all:{query}")),
            ("start".to_string(), "0".to_string()),
            ("max_results".to_string(), limit.to_string()),
        ];

        let body = self.get_text(&url, &params).await?;
        let feed: ArxivFeed = quick_xml::de::from_str(&body)?;

        if let Some(message) = feed.error_message() {
            tracing::warn!(source = "arxiv", query, %message, "arXiv rejected query");
            return Err(ClientError::bad_request(message));
        }

        let papers = feed.into_papers();
        tracing::debug!(source = "arxiv", query, count = papers.len(), "Search complete");
        Ok(papers)
    }
}

/// arXiv as a [`PaperSource`].
#[derive(Debug, Clone)]
pub struct ArxivSource {
    client: PaperClient,
}

impl ArxivSource {
    /// Wrap a shared client.
    #[must_use]
    pub fn new(client: PaperClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl PaperSource for ArxivSource {
    fn source(&self) -> Source {
        Source::Arxiv
    }

    async fn search(&self, query: &str, limit: u32) -> ClientResult<Vec<Paper>> {
        self.client.search_arxiv(query, limit).await
    }
}
