//! Discovery pipelines.
//!
//! [`search`] turns keyword search results into papers, [`mapping`] crawls
//! academic sites outward from them and [`analysis`] ties both together with
//! the relationship extractor and the heuristic graph.

pub mod analysis;
pub mod mapping;
pub mod search;

pub use analysis::{
    analyze_papers, discover_with_mapping, search_with_analysis, AnalysisOutcome, MappingOutcome,
    MappingStats,
};
pub use mapping::{discover_related_papers, process_discovered_urls, DiscoveryResult};
pub use search::{research_query, search_papers};
