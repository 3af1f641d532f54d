//! Heuristic attribute extraction.
//!
//! Turns unstructured search and crawl results into `Paper` records. The
//! pattern tables live in [`patterns`]; [`content`] handles records with a
//! content body and [`crawl`] handles bare URLs from site mapping.

pub mod content;
pub mod patterns;
pub mod crawl;

pub use content::{
    calculate_credibility, estimate_citations, extract_authors, extract_keywords, extract_paper,
    extract_year, make_abstract, venue_for_url,
};
pub use crawl::{infer_paper_from_url, title_from_url, url_id};
