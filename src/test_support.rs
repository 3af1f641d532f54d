//! Builders shared by unit tests.

use crate::paper::{DiscoveryMethod, Paper};

pub(crate) fn paper_titled(id: u32, title: &str) -> Paper {
    Paper {
        id,
        title: title.to_string(),
        authors: vec!["Jane Doe".to_string()],
        venue: "arXiv".to_string(),
        year: 2023,
        citations: 100,
        credibility: 7.0,
        abstract_text: String::new(),
        keywords: Vec::new(),
        url: format!("https://arxiv.org/abs/{}", id),
        discovery_method: DiscoveryMethod::TavilySearch,
        relevance: None,
        enhanced: false,
        discovered_at: None,
    }
}

pub(crate) fn paper_with(
    id: u32,
    title: &str,
    authors: &[&str],
    venue: &str,
    year: i32,
    keywords: &[&str],
) -> Paper {
    Paper {
        authors: authors.iter().map(|a| a.to_string()).collect(),
        venue: venue.to_string(),
        year,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        ..paper_titled(id, title)
    }
}
