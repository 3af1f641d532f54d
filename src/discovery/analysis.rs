use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mapping::{discover_related_papers, DiscoveryResult};
use super::search::search_papers;
use crate::config::Config;
use crate::error::Result;
use crate::graph::{build_connections, merge_graph, GraphData};
use crate::paper::{Paper, PaperSummary, SeedPaper};
use crate::providers::{RelationshipExtractor, SearchProvider, SiteMapper};

/// Search results plus the extractor's view of how they relate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub papers: Vec<Paper>,
    pub graph_data: GraphData,
}

/// Counters describing one mapping run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingStats {
    pub domains_explored: Vec<String>,
    pub total_urls_discovered: usize,
    pub papers_extracted: usize,
    /// Heuristic connections in the returned graph. Counts the crawl set
    /// alone when taken straight from a [`DiscoveryResult`].
    pub connections_found: usize,
}

impl From<&DiscoveryResult> for MappingStats {
    fn from(result: &DiscoveryResult) -> Self {
        Self {
            domains_explored: result.domains_explored.clone(),
            total_urls_discovered: result.total_discovered,
            papers_extracted: result.papers.len(),
            connections_found: result.paper_connections.len(),
        }
    }
}

/// Output of the full search, map and analyze pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingOutcome {
    /// Search-derived papers.
    pub papers: Vec<Paper>,
    /// Crawl-derived papers, including synthetic backfill.
    pub mapped_papers: Vec<Paper>,
    pub total_found: usize,
    pub mapping_stats: MappingStats,
    pub graph_data: GraphData,
}

/// Ask the extractor about `papers`, substituting the empty graph on failure.
pub async fn analyze_papers(papers: &[Paper], extractor: &dyn RelationshipExtractor) -> GraphData {
    let summaries: Vec<PaperSummary> = papers.iter().map(Paper::summary).collect();
    match extractor.analyze(&summaries).await {
        Ok(graph) => graph,
        Err(e) => {
            log::warn!("Relationship extraction failed: {}", e);
            GraphData::empty()
        }
    }
}

/// Search, then have the extractor relate the results.
pub async fn search_with_analysis<R>(
    topic: &str,
    max_results: usize,
    config: &Config,
    search: &dyn SearchProvider,
    extractor: &dyn RelationshipExtractor,
    rng: &mut R,
) -> Result<AnalysisOutcome>
where
    R: Rng + Send + ?Sized,
{
    let papers = search_papers(topic, max_results, &config.search, search, rng).await?;
    if papers.is_empty() {
        return Ok(AnalysisOutcome::default());
    }

    let graph_data = analyze_papers(&papers, extractor).await;
    Ok(AnalysisOutcome { papers, graph_data })
}

/// Search, map outward from the best results, then relate everything.
///
/// The heuristic graph covers the combined paper set, capped at
/// `graph.max_papers`, and is merged after any extractor edges.
pub async fn discover_with_mapping<R>(
    topic: &str,
    max_results: usize,
    config: &Config,
    search: &dyn SearchProvider,
    mapper: &dyn SiteMapper,
    extractor: &dyn RelationshipExtractor,
    rng: &mut R,
) -> Result<MappingOutcome>
where
    R: Rng + Send + ?Sized,
{
    let papers = search_papers(topic, max_results, &config.search, search, rng).await?;
    if papers.is_empty() {
        return Ok(MappingOutcome::default());
    }

    let seeds: Vec<SeedPaper> = papers
        .iter()
        .take(config.mapping.max_seed_papers)
        .map(SeedPaper::from)
        .collect();

    let discovery = discover_related_papers(topic, &seeds, config, mapper, rng).await;
    let mut mapping_stats = MappingStats::from(&discovery);
    let mapped_papers = discovery.papers;

    let combined: Vec<Paper> = papers.iter().chain(&mapped_papers).cloned().collect();
    let summaries: Vec<PaperSummary> = combined.iter().map(Paper::summary).collect();
    let external = extractor.analyze(&summaries).await;

    let graph_papers = &combined[..combined.len().min(config.graph.max_papers)];
    let connections = build_connections(graph_papers, topic, config.graph.similarity_threshold);
    mapping_stats.connections_found = connections.len();
    let graph_data = merge_graph(external, &connections);

    log::info!(
        "Discovery for {}: {} searched, {} mapped, {} edges",
        topic,
        papers.len(),
        mapped_papers.len(),
        graph_data.edges.len()
    );

    Ok(MappingOutcome {
        total_found: combined.len(),
        papers,
        mapped_papers,
        mapping_stats,
        graph_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::test_mocks::{
        zero_cooldown_config, MockExtractor, MockMapper, MockSearch,
    };
    use crate::graph::{connection_to_edge, GraphEdge};
    use crate::paper::{DiscoveryMethod, SearchRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn records(n: usize) -> Vec<SearchRecord> {
        (0..n)
            .map(|i| SearchRecord {
                title: Some(format!("Graph Learning Study {}", i)),
                content: Some("A 2022 study of neural networks and deep learning.".to_string()),
                url: Some(format!("https://arxiv.org/abs/22{:02}.0001", i)),
                score: None,
            })
            .collect()
    }

    fn llm_graph() -> GraphData {
        GraphData {
            nodes: vec![serde_json::json!({"id": "1"})],
            edges: vec![GraphEdge {
                source: "1".to_string(),
                target: "2".to_string(),
                relationship_type: "Builds_Upon".to_string(),
                strength: 4,
                description: "extends".to_string(),
                shared_entities: Vec::new(),
            }],
            entity_clusters: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_search_with_analysis_uses_extractor() {
        let config = zero_cooldown_config();
        let search = MockSearch::new(records(3));
        let extractor = MockExtractor::returning(llm_graph());
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = search_with_analysis("graphs", 10, &config, &search, &extractor, &mut rng)
            .await
            .unwrap();
        assert_eq!(outcome.papers.len(), 3);
        assert_eq!(outcome.graph_data, llm_graph());
        assert_eq!(extractor.seen_ids(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_search_with_analysis_extractor_failure() {
        let config = zero_cooldown_config();
        let search = MockSearch::new(records(2));
        let extractor = MockExtractor::failing();
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = search_with_analysis("graphs", 10, &config, &search, &extractor, &mut rng)
            .await
            .unwrap();
        assert_eq!(outcome.papers.len(), 2);
        assert_eq!(outcome.graph_data, GraphData::empty());
    }

    #[tokio::test]
    async fn test_no_search_results_short_circuits() {
        let config = zero_cooldown_config();
        let search = MockSearch::new(Vec::new());
        let mapper = MockMapper::with_urls(Vec::new());
        let extractor = MockExtractor::returning(llm_graph());
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = discover_with_mapping(
            "graphs", 10, &config, &search, &mapper, &extractor, &mut rng,
        )
        .await
        .unwrap();
        assert_eq!(outcome, MappingOutcome::default());
        assert!(mapper.requests().is_empty());
    }

    #[tokio::test]
    async fn test_discover_with_mapping_combines_sets() {
        let config = zero_cooldown_config();
        let search = MockSearch::new(records(7));
        let mapper = MockMapper::with_urls(vec![
            "https://arxiv.org/abs/graph-transformers".to_string(),
        ]);
        let extractor = MockExtractor::returning(llm_graph());
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = discover_with_mapping(
            "graphs", 10, &config, &search, &mapper, &extractor, &mut rng,
        )
        .await
        .unwrap();

        assert_eq!(outcome.papers.len(), 7);
        assert_eq!(outcome.mapped_papers.len(), 15);
        assert_eq!(outcome.total_found, 22);
        assert_eq!(outcome.mapping_stats.domains_explored.len(), 6);
        // six domains plus five seeds, one URL each
        assert_eq!(outcome.mapping_stats.total_urls_discovered, 11);
        assert_eq!(outcome.mapping_stats.papers_extracted, 15);
        assert_eq!(
            outcome
                .mapped_papers
                .iter()
                .filter(|p| p.discovery_method == DiscoveryMethod::FallbackGeneration)
                .count(),
            14
        );

        // extractor saw every paper, its edges come first
        assert_eq!(extractor.seen_ids().len(), 22);
        assert_eq!(outcome.graph_data.edges[0].relationship_type, "Builds_Upon");
        assert_eq!(outcome.graph_data.nodes.len(), 1);
    }

    #[tokio::test]
    async fn test_discover_with_mapping_extractor_failure_keeps_heuristics() {
        let config = zero_cooldown_config();
        let search = MockSearch::new(records(4));
        let mapper = MockMapper::with_urls(Vec::new());
        let extractor = MockExtractor::failing();
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = discover_with_mapping(
            "graphs", 10, &config, &search, &mapper, &extractor, &mut rng,
        )
        .await
        .unwrap();

        let combined: Vec<Paper> = outcome
            .papers
            .iter()
            .chain(&outcome.mapped_papers)
            .cloned()
            .collect();
        let expected: Vec<GraphEdge> = build_connections(&combined, "graphs", 0.3)
            .iter()
            .map(connection_to_edge)
            .collect();

        assert!(!expected.is_empty());
        assert_eq!(outcome.graph_data.edges, expected);
        assert_eq!(outcome.mapping_stats.connections_found, expected.len());
        assert!(outcome.graph_data.nodes.is_empty());
        assert!(outcome.graph_data.entity_clusters.is_empty());
    }

    #[tokio::test]
    async fn test_colliding_crawl_id_makes_no_self_loop() {
        let config = zero_cooldown_config();
        let search = MockSearch::new(records(10));
        // hashes to id 8, same as the eighth search result
        let mapper = MockMapper::with_urls(vec!["https://arxiv.org/abs/x1241".to_string()]);
        let extractor = MockExtractor::failing();
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = discover_with_mapping(
            "graphs", 10, &config, &search, &mapper, &extractor, &mut rng,
        )
        .await
        .unwrap();

        assert!(outcome.mapped_papers.iter().any(|p| p.id == 8));
        assert!(!outcome.graph_data.edges.is_empty());
        for edge in &outcome.graph_data.edges {
            assert_ne!(edge.source, edge.target);
        }
        assert_eq!(
            outcome.mapping_stats.connections_found,
            outcome.graph_data.edges.len()
        );
    }

    #[tokio::test]
    async fn test_heuristic_graph_capped() {
        let mut config = zero_cooldown_config();
        config.graph.max_papers = 2;
        let search = MockSearch::new(records(3));
        let mapper = MockMapper::with_urls(Vec::new());
        let extractor = MockExtractor::failing();
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = discover_with_mapping(
            "graphs", 10, &config, &search, &mapper, &extractor, &mut rng,
        )
        .await
        .unwrap();

        // only papers 1 and 2 are eligible, so at most one edge
        assert!(outcome.graph_data.edges.len() <= 1);
        for edge in &outcome.graph_data.edges {
            assert_eq!((edge.source.as_str(), edge.target.as_str()), ("1", "2"));
        }
    }
}
