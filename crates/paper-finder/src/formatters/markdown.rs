//! Markdown output formatting.

use crate::models::Paper;

/// Text shown when a search or listing has no results.
pub const EMPTY_STATE: &str = "No results found.";

/// Format a list of papers as Markdown.
#[must_use]
pub fn format_papers_markdown(papers: &[Paper]) -> String {
    if papers.is_empty() {
        return EMPTY_STATE.to_string();
    }

    let mut output = format!("# Papers ({} results)\n\n", papers.len());

    for (i, paper) in papers.iter().enumerate() {
        output.push_str(&format_paper_markdown(paper, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single paper as Markdown.
#[must_use]
pub fn format_paper_markdown(paper: &Paper, index: usize) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("## {}. {}\n\n", index, paper.title));

    // Authors
    if !paper.authors.is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", paper.author_names()));
    }

    // Year, source and topic
    let mut meta = Vec::new();
    if let Some(year) = paper.year {
        meta.push(format!("**Year**: {year}"));
    }
    meta.push(format!("**Source**: {}", paper.source));
    if let Some(topic) = &paper.topic {
        meta.push(format!("**Topic**: {topic}"));
    }

    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    // Links
    let mut links = Vec::new();
    if !paper.link.is_empty() {
        links.push(format!("[View]({})", paper.link));
    }
    if let Some(pdf) = paper.pdf.as_deref().filter(|_| paper.has_pdf()) {
        links.push(format!("[PDF]({pdf})"));
    }

    if !links.is_empty() {
        output.push_str(&format!("**Links**: {}\n", links.join(" | ")));
    }

    output
}
