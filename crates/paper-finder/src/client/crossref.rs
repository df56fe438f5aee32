//! CrossRef `/works` search.

use super::{PaperClient, PaperSource};
use crate::error::ClientResult;
use crate::models::{CrossRefResponse, Paper, Source};

impl PaperClient {
    /// Search CrossRef works.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or a body that
    /// is not a CrossRef work list.
    pub async fn search_crossref(&self, query: &str, limit: u32) -> ClientResult<Vec<Paper>> {
        let url = format!("{}/works", self.crossref_api_url);

        let mut params = vec![
            ("query".to_string(), query.to_string()),
            ("rows".to_string(), limit.to_string()),
        ];

        if let Some(mailto) = &self.crossref_mailto {
            params.push(("mailto".to_string(), mailto.clone()));
        }

        let body = self.get_text(&url, &params).await?;
        let response: CrossRefResponse = serde_json::from_str(&body)?;
        let papers = response.into_papers();

        tracing::debug!(source = "crossref", query, count = papers.len(), "Search complete");
        Ok(papers)
    }
}

/// CrossRef as a [`PaperSource`].
#[derive(Debug, Clone)]
pub struct CrossRefSource {
    client: PaperClient,
}

impl CrossRefSource {
    /// Wrap a shared client.
    #[must_use]
    pub fn new(client: PaperClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl PaperSource for CrossRefSource {
    fn source(&self) -> Source {
        Source::CrossRef
    }

    async fn search(&self, query: &str, limit: u32) -> ClientResult<Vec<Paper>> {
        self.client.search_crossref(query, limit).await
    }
}
