//! Paper Finder
//!
//! Searches academic papers on CrossRef and arXiv, merges the results with a
//! locally persisted list of user-submitted entries, and renders the list as
//! Markdown or JSON.
//!
//! # Features
//!
//! - **Two sources**: CrossRef works and arXiv Atom queries, fetched concurrently
//! - **Local entries**: user records kept in a JSON file and merged into searches
//! - **Live search**: debounced queries where stale searches never report back
//!
//! # Example
//!
//! ```no_run
//! use paper_finder::{config::Config, search::Searcher};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let searcher = Searcher::from_config(&config)?;
//!
//!     let papers = searcher.search("graph neural networks").await?;
//!     println!("{}", paper_finder::formatters::format_papers_markdown(&papers));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod search;
pub mod store;

pub use client::PaperClient;
pub use config::Config;
pub use error::{ClientError, SearchError, StoreError};
pub use search::Searcher;
pub use store::EntryStore;
