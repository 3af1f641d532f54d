//! HTTP API over the discovery pipelines.

pub mod http;
pub mod types;

pub use http::{AppState, PapergraphServer};
pub use types::{AnalysisResponse, MappingResponse, SearchRequest, SearchResponse};
