//! Entry form input and its validation.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{Paper, Source, collapse_whitespace};
use crate::error::{StoreError, StoreResult};

/// Earliest year accepted on a user entry.
pub const MIN_YEAR: i32 = 1000;

/// A paper submitted through the entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    /// Paper title (required).
    pub title: String,

    /// Comma-separated author names.
    #[serde(default)]
    pub authors: String,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Landing page URL (required).
    pub link: String,

    /// Direct PDF URL.
    #[serde(default)]
    pub pdf: Option<String>,

    /// Free-form topic.
    #[serde(default)]
    pub topic: Option<String>,
}

impl NewEntry {
    /// Validate the form and build the stored record.
    pub fn validate(self) -> StoreResult<Paper> {
        let title = collapse_whitespace(&self.title);
        if title.is_empty() {
            return Err(StoreError::validation("title", "is required"));
        }

        let authors = self
            .authors
            .split(',')
            .map(collapse_whitespace)
            .filter(|a| !a.is_empty())
            .collect();

        if let Some(year) = self.year {
            let max = chrono::Utc::now().year() + 1;
            if !(MIN_YEAR..=max).contains(&year) {
                return Err(StoreError::validation(
                    "year",
                    format!("must be between {MIN_YEAR} and {max}, got {year}"),
                ));
            }
        }

        let link = parse_web_url("link", &self.link)?;

        let pdf = match self.pdf.as_deref().map(str::trim) {
            Some(pdf) if !pdf.is_empty() => Some(parse_web_url("pdf", pdf)?),
            _ => None,
        };

        let topic = self.topic.as_deref().map(collapse_whitespace).filter(|t| !t.is_empty());

        Ok(Paper { title, authors, year: self.year, link, source: Source::User, pdf, topic })
    }
}

/// Require an absolute http(s) URL.
fn parse_web_url(field: &str, raw: &str) -> StoreResult<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(StoreError::validation(field, "is required"));
    }

    let parsed = url::Url::parse(raw)
        .map_err(|e| StoreError::validation(field, format!("'{raw}' is not a valid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        scheme => Err(StoreError::validation(field, format!("unsupported scheme '{scheme}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> NewEntry {
        NewEntry {
            title: "  A Study  of Things ".into(),
            authors: "Ada Lovelace, , Charles Babbage ".into(),
            year: Some(2020),
            link: "https://example.org/paper".into(),
            pdf: Some("  ".into()),
            topic: Some(" Computing ".into()),
        }
    }

    #[test]
    fn test_valid_entry_normalized() {
        let paper = entry().validate().unwrap();
        assert_eq!(paper.title, "A Study of Things");
        assert_eq!(paper.authors, vec!["Ada Lovelace", "Charles Babbage"]);
        assert_eq!(paper.link, "https://example.org/paper");
        assert_eq!(paper.pdf, None);
        assert_eq!(paper.topic.as_deref(), Some("Computing"));
        assert_eq!(paper.source, Source::User);
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = NewEntry { title: " \n ".into(), ..entry() }.validate().unwrap_err();
        assert!(matches!(err, StoreError::Validation { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        assert!(NewEntry { year: Some(999), ..entry() }.validate().is_err());
        assert!(NewEntry { year: Some(9999), ..entry() }.validate().is_err());
        assert!(NewEntry { year: None, ..entry() }.validate().is_ok());
    }

    #[test]
    fn test_link_must_be_web_url() {
        assert!(NewEntry { link: "not a url".into(), ..entry() }.validate().is_err());
        assert!(NewEntry { link: "ftp://example.org/x".into(), ..entry() }.validate().is_err());
        assert!(NewEntry { link: String::new(), ..entry() }.validate().is_err());
    }

    #[test]
    fn test_pdf_validated_when_present() {
        let err = NewEntry { pdf: Some("file:///tmp/x.pdf".into()), ..entry() }.validate();
        assert!(err.is_err());

        let ok = NewEntry { pdf: Some("https://example.org/x.pdf".into()), ..entry() }
            .validate()
            .unwrap();
        assert_eq!(ok.pdf.as_deref(), Some("https://example.org/x.pdf"));
    }
}
