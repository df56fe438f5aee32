//! Data models for paper records and the upstream API payloads.
//!
//! Wire models use `#[serde(default)]` for optional fields so partial
//! upstream records still deserialize.

mod arxiv;
mod crossref;
mod enums;
mod inputs;
mod paper;

pub use arxiv::{ArxivAuthor, ArxivCategory, ArxivEntry, ArxivFeed, ArxivLink};
pub use crossref::{
    CrossRefAuthor, CrossRefDate, CrossRefLink, CrossRefMessage, CrossRefResponse, CrossRefWork,
};
pub use enums::{ResponseFormat, SortOrder, Source};
pub use inputs::NewEntry;
pub use paper::Paper;

/// Collapse runs of whitespace (including line breaks) into single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
