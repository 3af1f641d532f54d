use std::collections::HashSet;
use std::hash::Hash;

use crate::paper::Paper;

const KEYWORD_WEIGHT: f64 = 0.4;
const AUTHOR_WEIGHT: f64 = 0.2;
const VENUE_WEIGHT: f64 = 0.1;
const YEAR_WEIGHT: f64 = 0.1;
const TITLE_WEIGHT: f64 = 0.2;

/// Years apart at which the proximity signal reaches zero.
const YEAR_DECAY: f64 = 5.0;

/// |A ∩ B| / |A ∪ B|, or 0.0 when both sets are empty.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Weighted similarity of two papers in [0, 1]; symmetric in its arguments.
///
/// `_topic` is accepted for context but does not influence the score.
pub fn paper_similarity(p1: &Paper, p2: &Paper, _topic: &str) -> f64 {
    let keywords = jaccard(&keyword_set(p1), &keyword_set(p2));
    let authors = jaccard(&author_set(p1), &author_set(p2));
    let venue = if p1.venue == p2.venue { 1.0 } else { 0.0 };
    let year_gap = (p1.year - p2.year).abs() as f64;
    let year = (1.0 - year_gap / YEAR_DECAY).max(0.0);
    let title = jaccard(&title_words(&p1.title), &title_words(&p2.title));

    keywords * KEYWORD_WEIGHT
        + authors * AUTHOR_WEIGHT
        + venue * VENUE_WEIGHT
        + year * YEAR_WEIGHT
        + title * TITLE_WEIGHT
}

fn keyword_set(paper: &Paper) -> HashSet<&str> {
    paper.keywords.iter().map(String::as_str).collect()
}

fn author_set(paper: &Paper) -> HashSet<&str> {
    paper.authors.iter().map(String::as_str).collect()
}

fn title_words(title: &str) -> HashSet<String> {
    title.to_lowercase().split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_paper;
    use crate::paper::{SearchRecord, UNKNOWN_AUTHOR};
    use crate::test_support::paper_with;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_weights_sum_to_one() {
        let total = KEYWORD_WEIGHT + AUTHOR_WEIGHT + VENUE_WEIGHT + YEAR_WEIGHT + TITLE_WEIGHT;
        assert!((total - 1.0).abs() < EPS);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        let empty: HashSet<&str> = HashSet::new();
        assert_eq!(jaccard(&empty, &empty), 0.0);
    }

    #[test]
    fn test_self_similarity_is_one() {
        let p = paper_with(1, "Graph Neural Networks", &["Ada Lovelace"], "ICML", 2022, &["gnn", "graphs"]);
        assert!((paper_similarity(&p, &p, "graphs") - 1.0).abs() < EPS);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = paper_with(1, "Deep Graph Models", &["Ada Lovelace", "Alan Turing"], "ICML", 2020, &["gnn", "graphs", "deep learning"]);
        let b = paper_with(2, "Shallow Graph Tricks", &["Alan Turing"], "NeurIPS", 2022, &["graphs", "heuristics"]);
        let ab = paper_similarity(&a, &b, "graphs");
        let ba = paper_similarity(&b, &a, "graphs");
        assert!((ab - ba).abs() < EPS);
        assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn test_identical_keywords_different_venue_one_year_apart() {
        let keywords = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let p1 = paper_with(1, "Sparse Attention Models", &["Ada Lovelace"], "ICML", 2022, &keywords);
        let p2 = paper_with(2, "Dense Attention Layers", &["Alan Turing"], "NeurIPS", 2023, &keywords);

        // title words: {sparse, attention, models} vs {dense, attention, layers} -> 1/5
        let title_sim = 1.0 / 5.0;
        let expected = 0.4 + 0.08 + 0.2 * title_sim;
        assert!((paper_similarity(&p1, &p2, "attention") - expected).abs() < EPS);
    }

    #[test]
    fn test_sentinel_author_counts_as_shared() {
        let p1 = paper_with(1, "X", &[UNKNOWN_AUTHOR], "A", 2000, &[]);
        let p2 = paper_with(2, "Y", &[UNKNOWN_AUTHOR], "B", 2010, &[]);
        assert!((paper_similarity(&p1, &p2, "") - AUTHOR_WEIGHT).abs() < EPS);
    }

    #[test]
    fn test_extracted_paper_without_authors_is_self_similar() {
        let mut rng = StdRng::seed_from_u64(5);
        let record = SearchRecord {
            content: Some("no names here 2022".to_string()),
            ..SearchRecord::default()
        };
        let p = extract_paper(1, &record, "graph learning", &mut rng);
        assert_eq!(p.authors, vec![UNKNOWN_AUTHOR]);
        assert!((paper_similarity(&p, &p, "graph learning") - 1.0).abs() < EPS);
    }

    #[test]
    fn test_year_proximity_floors_at_zero() {
        let p1 = paper_with(1, "X", &[], "A", 2000, &[]);
        let p2 = paper_with(2, "Y", &[], "B", 2004, &[]);
        let p3 = paper_with(3, "Z", &[], "B", 2020, &[]);
        assert!((paper_similarity(&p1, &p2, "") - 0.1 * 0.2).abs() < EPS);
        assert_eq!(paper_similarity(&p1, &p3, ""), 0.0);
    }
}
