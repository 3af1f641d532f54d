//! Paper entities and the raw records they are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author list used when nothing usable could be extracted.
pub const UNKNOWN_AUTHOR: &str = "Various Authors";

/// Where a paper came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMethod {
    /// Keyword search result with a content body
    TavilySearch,
    /// URL found by recursive site mapping
    TavilyMap,
    /// Synthetic backfill to reach the minimum corpus size
    FallbackGeneration,
}

impl DiscoveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMethod::TavilySearch => "tavily_search",
            DiscoveryMethod::TavilyMap => "tavily_map",
            DiscoveryMethod::FallbackGeneration => "fallback_generation",
        }
    }
}

/// A discovered research paper with inferred bibliographic attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: u32,
    pub title: String,
    /// Never empty; `[UNKNOWN_AUTHOR]` when extraction found nothing.
    pub authors: Vec<String>,
    pub venue: String,
    pub year: i32,
    /// Presentation estimate, not a measurement.
    pub citations: i64,
    /// Always within [1.0, 10.0].
    pub credibility: f64,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// At most eight entries.
    pub keywords: Vec<String>,
    pub url: String,
    pub discovery_method: DiscoveryMethod,
    #[serde(default)]
    pub relevance: Option<f64>,
    /// Set for crawl results on a known academic domain.
    #[serde(default)]
    pub enhanced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovered_at: Option<DateTime<Utc>>,
}

impl Paper {
    /// Deduplication key: lower-cased, trimmed title.
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }

    /// Compact form handed to the relationship extractor.
    pub fn summary(&self) -> PaperSummary {
        PaperSummary {
            id: self.id.to_string(),
            title: self.title.clone(),
            authors: self.authors.clone(),
            year: self.year,
            abstract_text: self.abstract_text.clone(),
            keywords: self.keywords.clone(),
            venue: self.venue.clone(),
            url: self.url.clone(),
            credibility_score: self.credibility,
        }
    }
}

pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// One ranked record returned by the keyword search provider.
///
/// Every field is optional on the wire; extraction supplies defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Minimal descriptor of an already-known paper used to steer site mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedPaper {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl From<&Paper> for SeedPaper {
    fn from(paper: &Paper) -> Self {
        Self {
            title: paper.title.clone(),
            authors: paper.authors.clone(),
            url: paper.url.clone(),
            keywords: paper.keywords.clone(),
        }
    }
}

/// Paper shape consumed by the relationship extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSummary {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: Vec<String>,
    pub venue: String,
    pub url: String,
    pub credibility_score: f64,
}
