//! Configuration for the paper finder.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::SortOrder;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// CrossRef REST API base URL.
    pub const CROSSREF_API: &str = "https://api.crossref.org";

    /// arXiv export API base URL.
    pub const ARXIV_API: &str = "https://export.arxiv.org/api";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Results requested from each source per search.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Upper bound accepted for the per-source limit.
    pub const MAX_LIMIT: u32 = 100;

    /// Quiet period after the last query edit before a live search fires.
    pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

    /// Retries for transient transport failures.
    pub const MAX_RETRIES: u32 = 2;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Name of the file holding user-submitted entries.
pub const STORE_FILE: &str = "user_papers.json";

/// Finder configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact address sent to CrossRef (polite pool), optional.
    pub crossref_mailto: Option<String>,

    /// Base URL for the CrossRef API (for testing with mock servers).
    pub crossref_api_url: String,

    /// Base URL for the arXiv API (for testing with mock servers).
    pub arxiv_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,

    /// Results requested from each source.
    pub limit: u32,

    /// Debounce delay for live search.
    pub debounce_delay: Duration,

    /// Ordering applied to merged results.
    pub sort_order: SortOrder,

    /// Path of the persisted entry list.
    pub store_path: PathBuf,
}

impl Config {
    /// Create a configuration with production endpoints.
    #[must_use]
    pub fn new(crossref_mailto: Option<String>) -> Self {
        Self {
            crossref_mailto,
            crossref_api_url: api::CROSSREF_API.to_string(),
            arxiv_api_url: api::ARXIV_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            limit: api::DEFAULT_LIMIT,
            debounce_delay: api::DEBOUNCE_DELAY,
            sort_order: SortOrder::default(),
            store_path: default_store_path(),
        }
    }

    /// Create a test configuration pointing both APIs at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            crossref_mailto: None,
            crossref_api_url: format!("{}/crossref", base_url),
            arxiv_api_url: format!("{}/arxiv", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0, // Failures surface immediately in tests
            limit: api::DEFAULT_LIMIT,
            debounce_delay: Duration::from_millis(0),
            sort_order: SortOrder::default(),
            store_path: std::env::temp_dir().join("paper-finder-test").join(STORE_FILE),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if `PAPER_FINDER_LIMIT` is not a number in range.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new(std::env::var("CROSSREF_MAILTO").ok());

        if let Ok(path) = std::env::var("PAPER_FINDER_STORE") {
            config.store_path = PathBuf::from(path);
        }

        if let Ok(limit) = std::env::var("PAPER_FINDER_LIMIT") {
            config = config.with_limit(limit.parse()?)?;
        }

        Ok(config)
    }

    /// Set the per-source result limit.
    ///
    /// # Errors
    ///
    /// Returns error if the limit is zero or above [`api::MAX_LIMIT`].
    pub fn with_limit(mut self, limit: u32) -> anyhow::Result<Self> {
        if limit == 0 || limit > api::MAX_LIMIT {
            anyhow::bail!("limit must be between 1 and {}, got {limit}", api::MAX_LIMIT);
        }
        self.limit = limit;
        Ok(self)
    }

    /// Override the store location.
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Check if a CrossRef contact address is configured.
    #[must_use]
    pub const fn has_mailto(&self) -> bool {
        self.crossref_mailto.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Default location of the entry store.
///
/// Uses the XDG data directory, falling back to `~/.local/share`, then the
/// current directory.
#[must_use]
pub fn default_store_path() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            std::env::var("HOME")
                .map(|h| PathBuf::from(h).join(".local/share"))
                .unwrap_or_else(|_| PathBuf::from("."))
        })
        .join("paper-finder")
        .join(STORE_FILE)
}
