//! The paper record shared by every source.

use serde::{Deserialize, Serialize};

use super::Source;

/// Title used when a source gives none.
pub const UNTITLED: &str = "Untitled";

/// A paper from CrossRef, arXiv, or the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Paper title.
    pub title: String,

    /// Author display names.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Landing page URL.
    #[serde(default)]
    pub link: String,

    /// Record origin.
    #[serde(default)]
    pub source: Source,

    /// Direct PDF URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,

    /// Subject or category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl Paper {
    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }

    /// Check if a PDF link is available.
    #[must_use]
    pub fn has_pdf(&self) -> bool {
        self.pdf.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Case-insensitive substring test over title and author names.
    ///
    /// A blank needle matches everything.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.authors.iter().any(|a| a.to_lowercase().contains(&needle))
    }

    /// Link normalized for duplicate detection.
    #[must_use]
    pub fn link_key(&self) -> String {
        self.link.trim().trim_end_matches('/').to_lowercase()
    }
}
