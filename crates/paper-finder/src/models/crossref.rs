//! CrossRef works API payloads and their mapping onto [`Paper`].

use serde::{Deserialize, Serialize};

use super::paper::UNTITLED;
use super::{Paper, Source, collapse_whitespace};

/// Top-level `/works` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossRefResponse {
    /// Response envelope.
    #[serde(default)]
    pub message: Option<CrossRefMessage>,
}

impl CrossRefResponse {
    /// Map every work in the response to a paper record.
    #[must_use]
    pub fn into_papers(self) -> Vec<Paper> {
        self.message
            .map(|m| m.items.into_iter().map(CrossRefWork::into_paper).collect())
            .unwrap_or_default()
    }
}

/// Work list envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossRefMessage {
    /// Matching works.
    #[serde(default)]
    pub items: Vec<CrossRefWork>,
}

/// A single CrossRef work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrossRefWork {
    /// Title variants; the first is the main title.
    #[serde(default)]
    pub title: Vec<String>,

    /// Contributors.
    #[serde(default)]
    pub author: Vec<CrossRefAuthor>,

    /// Digital Object Identifier.
    #[serde(default, rename = "DOI")]
    pub doi: Option<String>,

    /// Resolver URL.
    #[serde(default, rename = "URL")]
    pub url: Option<String>,

    /// Print publication date.
    #[serde(default)]
    pub published_print: Option<CrossRefDate>,

    /// Online publication date.
    #[serde(default)]
    pub published_online: Option<CrossRefDate>,

    /// Earliest known publication date.
    #[serde(default)]
    pub issued: Option<CrossRefDate>,

    /// Record creation date.
    #[serde(default)]
    pub created: Option<CrossRefDate>,

    /// Full-text links.
    #[serde(default)]
    pub link: Vec<CrossRefLink>,

    /// Subject classifications.
    #[serde(default)]
    pub subject: Vec<String>,
}

impl CrossRefWork {
    /// Publication year, preferring print over online over issued over created.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        [&self.published_print, &self.published_online, &self.issued, &self.created]
            .into_iter()
            .flatten()
            .find_map(CrossRefDate::year)
    }

    /// Map this work to a paper record.
    #[must_use]
    pub fn into_paper(self) -> Paper {
        let year = self.year();

        let title = self
            .title
            .iter()
            .map(|t| collapse_whitespace(t))
            .find(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        let authors = self.author.iter().filter_map(CrossRefAuthor::display_name).collect();

        let link = self
            .url
            .filter(|u| !u.is_empty())
            .or_else(|| self.doi.as_ref().map(|doi| format!("https://doi.org/{doi}")))
            .unwrap_or_default();

        let pdf = self
            .link
            .into_iter()
            .find(|l| l.content_type.as_deref() == Some("application/pdf"))
            .and_then(|l| l.url);

        let topic = self.subject.into_iter().find(|s| !s.trim().is_empty());

        Paper { title, authors, year, link, source: Source::CrossRef, pdf, topic }
    }
}

/// A contributor on a CrossRef work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossRefAuthor {
    /// Given name.
    #[serde(default)]
    pub given: Option<String>,

    /// Family name.
    #[serde(default)]
    pub family: Option<String>,

    /// Organisational name (used for corporate authors).
    #[serde(default)]
    pub name: Option<String>,
}

impl CrossRefAuthor {
    /// `"given family"` when either part exists, else `name`.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.given, &self.family]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(String::from)
        } else {
            Some(parts.join(" "))
        }
    }
}

/// CrossRef partial date: `{"date-parts": [[2020, 5, 17]]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossRefDate {
    /// Date parts; components may be null.
    #[serde(default, rename = "date-parts")]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl CrossRefDate {
    /// The year component, if present.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date_parts.first()?.first().copied().flatten()
    }
}

/// Full-text link on a CrossRef work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossRefLink {
    /// Link target.
    #[serde(default, rename = "URL")]
    pub url: Option<String>,

    /// MIME type of the target.
    #[serde(default, rename = "content-type")]
    pub content_type: Option<String>,
}
