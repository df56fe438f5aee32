//! HTTP client for the CrossRef and arXiv search APIs.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff for transient failures
//! - One status-code table shared by both APIs

mod arxiv;
mod crossref;

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Paper, Source};

pub use arxiv::ArxivSource;
pub use crossref::CrossRefSource;

/// A searchable paper catalogue.
#[async_trait::async_trait]
pub trait PaperSource: Send + Sync {
    /// Which source records from this catalogue carry.
    fn source(&self) -> Source;

    /// Search for up to `limit` papers matching `query`.
    async fn search(&self, query: &str, limit: u32) -> ClientResult<Vec<Paper>>;
}

/// Client shared by the CrossRef and arXiv sources.
#[derive(Clone)]
pub struct PaperClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// CrossRef API base URL.
    crossref_api_url: String,

    /// arXiv API base URL.
    arxiv_api_url: String,

    /// CrossRef polite-pool contact.
    crossref_mailto: Option<String>,

    /// Request timeout, reported on timeouts.
    request_timeout: Duration,
}

impl PaperClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let user_agent = match &config.crossref_mailto {
            Some(mailto) => {
                format!("{}/{} (mailto:{mailto})", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            }
            None => format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        };

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(500), Duration::from_secs(10))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            crossref_api_url: config.crossref_api_url.trim_end_matches('/').to_string(),
            arxiv_api_url: config.arxiv_api_url.trim_end_matches('/').to_string(),
            crossref_mailto: config.crossref_mailto.clone(),
            request_timeout: config.request_timeout,
        })
    }

    /// Check if a CrossRef contact address is configured.
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        self.crossref_mailto.is_some()
    }

    /// Make a GET request and return the body text.
    async fn get_text(&self, url: &str, params: &[(String, String)]) -> ClientResult<String> {
        let response =
            self.client.get(url).query(params).send().await.map_err(|e| self.classify(e))?;

        let response = self.handle_response(response).await?;
        response.text().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.request_timeout)
            } else {
                ClientError::from(e)
            }
        })
    }

    /// Turn transport timeouts into [`ClientError::Timeout`].
    ///
    /// The retry middleware wraps transport failures, so the timeout may sit
    /// anywhere in the error's source chain.
    fn classify(&self, err: reqwest_middleware::Error) -> ClientError {
        if is_timeout(&err) {
            ClientError::Timeout(self.request_timeout)
        } else {
            ClientError::from(err)
        }
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

/// Whether a middleware error was caused by a request timeout.
fn is_timeout(err: &reqwest_middleware::Error) -> bool {
    match err {
        reqwest_middleware::Error::Reqwest(e) => e.is_timeout(),
        reqwest_middleware::Error::Middleware(e) => e.chain().any(|cause| {
            cause.downcast_ref::<reqwest::Error>().is_some_and(reqwest::Error::is_timeout)
                || cause.downcast_ref::<reqwest_middleware::Error>().is_some_and(is_timeout)
        }),
    }
}

impl std::fmt::Debug for PaperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperClient")
            .field("crossref_api_url", &self.crossref_api_url)
            .field("arxiv_api_url", &self.arxiv_api_url)
            .field("has_mailto", &self.has_mailto())
            .finish()
    }
}
