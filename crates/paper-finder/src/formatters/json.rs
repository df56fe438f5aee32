//! JSON output formatting.

use serde_json::{Value, json};

use crate::models::Paper;

/// Create a compact paper representation for JSON output.
///
/// Optional fields appear only when present.
#[must_use]
pub fn compact_paper(paper: &Paper) -> Value {
    let mut obj = json!({
        "title": paper.title,
        "year": paper.year,
        "source": paper.source,
    });

    if !paper.authors.is_empty() {
        obj["authors"] = json!(paper.authors);
    }

    if !paper.link.is_empty() {
        obj["link"] = json!(paper.link);
    }

    if let Some(pdf) = &paper.pdf {
        obj["pdf"] = json!(pdf);
    }

    if let Some(topic) = &paper.topic {
        obj["topic"] = json!(topic);
    }

    obj
}

/// Format a list of papers as a JSON document with a count.
#[must_use]
pub fn format_papers_json(papers: &[Paper]) -> String {
    let doc = json!({
        "count": papers.len(),
        "papers": papers.iter().map(compact_paper).collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string())
}
