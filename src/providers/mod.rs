//! External collaborators: keyword search, site mapping and relationship
//! extraction.
//!
//! The pipeline only sees these traits, so tests substitute in-memory
//! implementations and the HTTP clients stay swappable. Each implementation
//! owns its own timeouts; none of them retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::GraphData;
use crate::paper::{PaperSummary, SearchRecord};

pub mod gemini;
pub mod tavily;

pub use gemini::GeminiExtractor;
pub use tavily::TavilyClient;

/// Ranked web search restricted to a domain allowlist.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query`, returning at most `limit` records.
    ///
    /// A provider without credentials returns an empty list rather than an
    /// error.
    async fn search(
        &self,
        query: &str,
        domains: &[String],
        limit: usize,
        include_raw_content: bool,
    ) -> Result<Vec<SearchRecord>>;

    /// Whether requests will actually reach the backend.
    fn is_configured(&self) -> bool {
        true
    }
}

/// One site-mapping crawl rooted at `seed_url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapRequest {
    pub seed_url: String,
    pub max_depth: u32,
    pub max_breadth: u32,
    pub limit: u32,
    /// Path regexes the crawler should prefer.
    pub select_paths: Vec<String>,
    /// Path regexes the crawler must skip.
    pub exclude_paths: Vec<String>,
    /// Natural-language guidance for the crawler.
    pub instructions: String,
}

/// Recursive crawler returning discovered URLs.
#[async_trait]
pub trait SiteMapper: Send + Sync {
    async fn map(&self, request: &MapRequest) -> Result<Vec<String>>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// LLM-backed extraction of entities and relationships between papers.
#[async_trait]
pub trait RelationshipExtractor: Send + Sync {
    async fn analyze(&self, papers: &[PaperSummary]) -> Result<GraphData>;
}
