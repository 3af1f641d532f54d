use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::corpus::{deduplicate, enforce_quota};
use crate::extract::infer_paper_from_url;
use crate::graph::{build_connections, Connection};
use crate::paper::{Paper, SeedPaper};
use crate::providers::{MapRequest, SiteMapper};

/// Everything learned from one site-mapping run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Deduplicated, quota-filled crawl papers.
    pub papers: Vec<Paper>,
    /// Every URL returned by the mapper, in discovery order.
    pub mapped_urls: Vec<String>,
    pub total_discovered: usize,
    /// Priority domains that mapped without error.
    pub domains_explored: Vec<String>,
    /// Heuristic connections among `papers`.
    pub paper_connections: Vec<Connection>,
}

/// Crawler guidance for a topic.
pub fn mapping_instructions(topic: &str) -> String {
    format!(
        "Find research papers and academic content related to \"{topic}\". \
         Focus on research papers and publications, citation networks and references, \
         author pages and research groups, conference proceedings and journals, \
         technical reports and preprints. \
         Avoid non-academic content like news, blogs, or commercial pages."
    )
}

/// Map the priority academic domains and the sites of the seed papers, then
/// turn every discovered URL into a paper.
///
/// Domains are mapped one after another with a cooldown after each success.
/// A failing domain or seed is logged and skipped; an unconfigured mapper
/// yields an empty result.
pub async fn discover_related_papers<R>(
    topic: &str,
    seeds: &[SeedPaper],
    config: &Config,
    mapper: &dyn SiteMapper,
    rng: &mut R,
) -> DiscoveryResult
where
    R: Rng + Send + ?Sized,
{
    if !mapper.is_configured() {
        log::warn!("Site mapper not configured, skipping mapping");
        return DiscoveryResult::default();
    }

    let mapping = &config.mapping;
    let instructions = mapping_instructions(topic);
    let mut mapped_urls = Vec::new();
    let mut domains_explored = Vec::new();

    for domain in &mapping.priority_domains {
        log::info!("Mapping domain: {}", domain);
        let request = MapRequest {
            seed_url: domain.clone(),
            max_depth: mapping.domain_max_depth,
            max_breadth: mapping.domain_max_breadth,
            limit: mapping.domain_limit,
            select_paths: mapping.select_paths.clone(),
            exclude_paths: mapping.exclude_paths.clone(),
            instructions: instructions.clone(),
        };

        match mapper.map(&request).await {
            Ok(urls) => {
                mapped_urls.extend(urls);
                domains_explored.push(domain.clone());
                cooldown(mapping.domain_cooldown_ms).await;
            }
            Err(e) => log::error!("Error mapping {}: {}", domain, e),
        }
    }

    for seed in seeds.iter().take(mapping.max_seed_papers) {
        if seed.url.trim().is_empty() {
            continue;
        }

        let origin = match ::url::Url::parse(&seed.url) {
            Ok(parsed) => parsed.origin().ascii_serialization(),
            Err(e) => {
                log::error!("Error mapping around paper {}: {}", seed.title, e);
                continue;
            }
        };

        let request = MapRequest {
            seed_url: origin,
            max_depth: mapping.seed_max_depth,
            max_breadth: mapping.seed_max_breadth,
            limit: mapping.seed_limit,
            select_paths: mapping.select_paths.clone(),
            exclude_paths: mapping.exclude_paths.clone(),
            instructions: mapping_instructions(&format!("{} {}", topic, seed.title)),
        };

        match mapper.map(&request).await {
            Ok(urls) => {
                mapped_urls.extend(urls);
                cooldown(mapping.seed_cooldown_ms).await;
            }
            Err(e) => log::error!("Error mapping around paper {}: {}", seed.title, e),
        }
    }

    let papers = process_discovered_urls(&mapped_urls, topic, config, rng);
    let paper_connections =
        build_connections(&papers, topic, config.graph.similarity_threshold);

    log::info!(
        "Mapping found {} URLs across {} domains, {} papers, {} connections",
        mapped_urls.len(),
        domains_explored.len(),
        papers.len(),
        paper_connections.len()
    );

    DiscoveryResult {
        papers,
        total_discovered: mapped_urls.len(),
        mapped_urls,
        domains_explored,
        paper_connections,
    }
}

/// URLs to papers: infer, deduplicate by title up to the corpus cap, then
/// backfill to the corpus minimum.
pub fn process_discovered_urls<R>(
    urls: &[String],
    topic: &str,
    config: &Config,
    rng: &mut R,
) -> Vec<Paper>
where
    R: Rng + ?Sized,
{
    let academic_domains = &config.mapping.academic_domains;
    let inferred = urls.iter().filter_map(|url| {
        match infer_paper_from_url(url, topic, academic_domains, &mut *rng) {
            Ok(paper) => Some(paper),
            Err(e) => {
                log::error!("Error processing URL {:?}: {}", url, e);
                None
            }
        }
    });

    let papers = deduplicate(inferred, config.corpus.max_papers);
    let papers = enforce_quota(papers, topic, config.corpus.min_papers);
    log::info!("Processed {} papers from {} URLs", papers.len(), urls.len());
    papers
}

async fn cooldown(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
