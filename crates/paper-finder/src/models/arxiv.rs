//! arXiv Atom feed payloads and their mapping onto [`Paper`].
//!
//! Element names are matched with and without the `arxiv:` prefix so the
//! mapping does not depend on how the deserializer treats namespaces.

use serde::{Deserialize, Serialize};

use super::paper::UNTITLED;
use super::{Paper, Source, collapse_whitespace};

/// Marker in the entry id of an arXiv error report.
const ERROR_ID_MARKER: &str = "/api/errors";

/// Atom `<feed>` returned by `/api/query`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArxivFeed {
    /// Result entries.
    #[serde(default)]
    pub entry: Vec<ArxivEntry>,
}

impl ArxivFeed {
    /// The error text if this feed is an arXiv error report.
    ///
    /// arXiv answers malformed queries with a feed whose only entry has an
    /// id under `/api/errors` and the message in `<summary>`.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self.entry.as_slice() {
            [only] if only.id.as_deref().is_some_and(|id| id.contains(ERROR_ID_MARKER)) => Some(
                only.summary
                    .as_deref()
                    .map(collapse_whitespace)
                    .unwrap_or_else(|| "arXiv rejected the query".to_string()),
            ),
            _ => None,
        }
    }

    /// Map every entry to a paper record.
    #[must_use]
    pub fn into_papers(self) -> Vec<Paper> {
        self.entry.into_iter().map(ArxivEntry::into_paper).collect()
    }
}

/// Atom `<entry>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArxivEntry {
    /// Abstract page URL.
    #[serde(default)]
    pub id: Option<String>,

    /// Title, may span several lines.
    #[serde(default)]
    pub title: Option<String>,

    /// Abstract.
    #[serde(default)]
    pub summary: Option<String>,

    /// First version timestamp (RFC 3339).
    #[serde(default)]
    pub published: Option<String>,

    /// Latest version timestamp (RFC 3339).
    #[serde(default)]
    pub updated: Option<String>,

    /// Authors.
    #[serde(default)]
    pub author: Vec<ArxivAuthor>,

    /// Alternate and related links.
    #[serde(default)]
    pub link: Vec<ArxivLink>,

    /// Primary subject category.
    #[serde(default, rename = "primary_category", alias = "arxiv:primary_category")]
    pub primary_category: Option<ArxivCategory>,

    /// All subject categories.
    #[serde(default)]
    pub category: Vec<ArxivCategory>,
}

impl ArxivEntry {
    /// Publication year from `published`, else `updated`.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        [&self.published, &self.updated]
            .into_iter()
            .flatten()
            .find_map(|ts| ts.trim().get(..4)?.parse().ok())
    }

    /// Map this entry to a paper record.
    #[must_use]
    pub fn into_paper(self) -> Paper {
        let year = self.year();

        let title = self
            .title
            .as_deref()
            .map(collapse_whitespace)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        let authors = self
            .author
            .into_iter()
            .filter_map(|a| a.name)
            .map(|n| collapse_whitespace(&n))
            .filter(|n| !n.is_empty())
            .collect();

        let link = self
            .link
            .iter()
            .find(|l| l.rel.as_deref() == Some("alternate"))
            .and_then(|l| l.href.clone())
            .or_else(|| self.id.as_deref().map(str::trim).map(String::from))
            .unwrap_or_default();

        let pdf = self
            .link
            .iter()
            .find(|l| l.title.as_deref() == Some("pdf"))
            .and_then(|l| l.href.clone());

        let topic = self
            .primary_category
            .and_then(|c| c.term)
            .or_else(|| self.category.into_iter().find_map(|c| c.term));

        Paper { title, authors, year, link, source: Source::Arxiv, pdf, topic }
    }
}

/// Atom `<author>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArxivAuthor {
    /// Author name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Atom `<link>`; all data lives in attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArxivLink {
    /// Target URL.
    #[serde(default, rename = "@href")]
    pub href: Option<String>,

    /// Relation (`alternate`, `related`).
    #[serde(default, rename = "@rel")]
    pub rel: Option<String>,

    /// Link title (`pdf`, `doi`).
    #[serde(default, rename = "@title")]
    pub title: Option<String>,
}

/// `<category term="..."/>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArxivCategory {
    /// Category code, e.g. `cs.LG`.
    #[serde(default, rename = "@term")]
    pub term: Option<String>,
}
