//! Corpus shaping: duplicate removal and minimum-size backfill.

pub mod dedup;
pub mod quota;

pub use dedup::deduplicate;
pub use quota::{enforce_quota, generate_fallback_papers};
