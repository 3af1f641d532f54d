use serde::{Deserialize, Serialize};

use crate::discovery::{AnalysisOutcome, MappingOutcome, MappingStats};
use crate::graph::GraphData;
use crate::paper::Paper;

fn default_max_results() -> usize {
    10
}

/// Body of the POST search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub topic: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

/// Query string of `GET /search-papers-simple`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleSearchQuery {
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub papers: Vec<Paper>,
    pub total_found: usize,
    pub query: String,
}

impl SearchResponse {
    pub fn new(query: &str, papers: Vec<Paper>) -> Self {
        Self {
            total_found: papers.len(),
            papers,
            query: query.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub papers: Vec<Paper>,
    pub total_found: usize,
    pub query: String,
    pub graph_data: GraphData,
}

impl AnalysisResponse {
    pub fn new(query: &str, outcome: AnalysisOutcome) -> Self {
        Self {
            total_found: outcome.papers.len(),
            papers: outcome.papers,
            query: query.to_string(),
            graph_data: outcome.graph_data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingResponse {
    /// Search-derived papers only; crawl papers are in `mapped_papers`.
    pub papers: Vec<Paper>,
    pub mapped_papers: Vec<Paper>,
    pub total_found: usize,
    pub mapping_stats: MappingStats,
    pub query: String,
    pub graph_data: GraphData,
}

impl MappingResponse {
    pub fn new(query: &str, outcome: MappingOutcome) -> Self {
        Self {
            papers: outcome.papers,
            mapped_papers: outcome.mapped_papers,
            total_found: outcome.total_found,
            mapping_stats: outcome.mapping_stats,
            query: query.to_string(),
            graph_data: outcome.graph_data,
        }
    }
}
