//! Client-side filtering, ordering and merging of result lists.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{Paper, SortOrder};

/// Keep papers whose title or authors contain `needle`, ignoring case.
///
/// A blank needle keeps everything.
#[must_use]
pub fn filter_papers(papers: Vec<Paper>, needle: &str) -> Vec<Paper> {
    papers.into_iter().filter(|p| p.matches(needle)).collect()
}

/// Order papers by year. Papers without a year go last; ties keep their
/// original order.
pub fn sort_papers(papers: &mut [Paper], order: SortOrder) {
    match order {
        SortOrder::Newest => papers.sort_by(|a, b| compare_years(a.year, b.year, true)),
        SortOrder::Oldest => papers.sort_by(|a, b| compare_years(a.year, b.year, false)),
        SortOrder::Relevance => {}
    }
}

fn compare_years(a: Option<i32>, b: Option<i32>, newest_first: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Combine user entries matching `query` with remote results.
///
/// User entries come first. Later records whose link duplicates an earlier
/// one are dropped; records without a link are always kept.
#[must_use]
pub fn merge_results(remote: Vec<Paper>, user: Vec<Paper>, query: &str) -> Vec<Paper> {
    let mut seen = HashSet::new();

    filter_papers(user, query)
        .into_iter()
        .chain(remote)
        .filter(|p| {
            let key = p.link_key();
            key.is_empty() || seen.insert(key)
        })
        .collect()
}
