use std::collections::HashSet;

use super::similarity::paper_similarity;
use super::{Connection, ConnectionType};
use crate::paper::Paper;

const STRONG_THRESHOLD: f64 = 0.7;
const MODERATE_THRESHOLD: f64 = 0.5;

/// Connect every pair (i < j) whose similarity exceeds `threshold`.
///
/// Pairs sharing an id are skipped so no edge is a self-loop.
/// Quadratic in the number of papers; callers cap the input size.
pub fn build_connections(papers: &[Paper], topic: &str, threshold: f64) -> Vec<Connection> {
    let mut connections = Vec::new();

    for (i, p1) in papers.iter().enumerate() {
        for p2 in &papers[i + 1..] {
            if p1.id == p2.id {
                log::debug!("Skipping papers {:?} and {:?} sharing id {}", p1.title, p2.title, p1.id);
                continue;
            }

            let similarity = paper_similarity(p1, p2, topic);
            if similarity <= threshold {
                continue;
            }

            connections.push(Connection {
                source: p1.id,
                target: p2.id,
                similarity,
                connection_type: classify_connection(p1, p2, similarity),
                shared_keywords: shared_keywords(p1, p2),
                venue_connection: p1.venue == p2.venue,
            });
        }
    }

    log::debug!(
        "Built {} connections from {} papers",
        connections.len(),
        papers.len()
    );
    connections
}

/// First matching rule wins: similarity bands, then venue, then authors.
pub fn classify_connection(p1: &Paper, p2: &Paper, similarity: f64) -> ConnectionType {
    if similarity > STRONG_THRESHOLD {
        ConnectionType::StrongSimilarity
    } else if similarity > MODERATE_THRESHOLD {
        ConnectionType::ModerateSimilarity
    } else if p1.venue == p2.venue {
        ConnectionType::SameVenue
    } else if p1.authors.iter().any(|a| p2.authors.contains(a)) {
        ConnectionType::SharedAuthor
    } else {
        ConnectionType::WeakSimilarity
    }
}

/// Keywords present in both papers, in the first paper's order.
pub fn shared_keywords(p1: &Paper, p2: &Paper) -> Vec<String> {
    let other: HashSet<&str> = p2.keywords.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    p1.keywords
        .iter()
        .filter(|k| other.contains(k.as_str()) && seen.insert(k.as_str()))
        .cloned()
        .collect()
}
