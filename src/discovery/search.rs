use rand::Rng;

use crate::config::SearchConfig;
use crate::error::{PapergraphError, Result};
use crate::extract::extract_paper;
use crate::paper::Paper;
use crate::providers::SearchProvider;

/// Query sent to the search provider for a topic.
pub fn research_query(topic: &str) -> String {
    format!("research papers on \"{}\"", topic)
}

/// Search for papers on `topic` and extract one paper per result.
///
/// At least `config.min_results` results are requested even when the caller
/// asks for fewer. Ids are sequential from 1 in result order.
pub async fn search_papers<R>(
    topic: &str,
    max_results: usize,
    config: &SearchConfig,
    provider: &dyn SearchProvider,
    rng: &mut R,
) -> Result<Vec<Paper>>
where
    R: Rng + Send + ?Sized,
{
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(PapergraphError::InvalidInput("topic must not be empty".to_string()));
    }

    let limit = max_results.max(config.min_results);
    let records = provider
        .search(&research_query(topic), &config.academic_domains, limit, true)
        .await?;

    let papers: Vec<Paper> = records
        .iter()
        .enumerate()
        .map(|(i, record)| extract_paper(i as u32 + 1, record, topic, &mut *rng))
        .collect();

    log::info!("Extracted {} papers for topic {}", papers.len(), topic);
    Ok(papers)
}
