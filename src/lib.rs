pub mod config;
pub mod error;
pub mod paper;
pub mod extract;
pub mod corpus;
pub mod graph;
pub mod providers;
pub mod discovery;
pub mod api;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::{PapergraphError, Result};
pub use paper::{DiscoveryMethod, Paper, PaperSummary, SearchRecord, SeedPaper};
pub use graph::{Connection, ConnectionType, GraphData, GraphEdge};
pub use discovery::{discover_related_papers, DiscoveryResult};
