use std::collections::HashSet;

use crate::paper::Paper;

/// Keep the first paper for each normalized title, in input order.
///
/// Stops accepting once `max_papers` have been kept, regardless of how much
/// input remains.
pub fn deduplicate<I>(papers: I, max_papers: usize) -> Vec<Paper>
where
    I: IntoIterator<Item = Paper>,
{
    let mut seen_titles = HashSet::new();
    let mut kept = Vec::new();

    for paper in papers {
        if kept.len() >= max_papers {
            break;
        }

        if seen_titles.insert(paper.normalized_title()) {
            kept.push(paper);
        } else {
            log::debug!("Dropping duplicate title: {}", paper.title);
        }
    }

    kept
}
