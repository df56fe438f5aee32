//! Output formatting for result lists.

mod json;
mod markdown;

pub use json::{compact_paper, format_papers_json};
pub use markdown::{EMPTY_STATE, format_paper_markdown, format_papers_markdown};

use crate::models::{Paper, ResponseFormat};

/// Render papers in the requested format.
#[must_use]
pub fn render(papers: &[Paper], format: ResponseFormat) -> String {
    match format {
        ResponseFormat::Markdown => format_papers_markdown(papers),
        ResponseFormat::Json => format_papers_json(papers),
    }
}
