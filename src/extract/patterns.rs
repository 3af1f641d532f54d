//! Pattern tables used by the extractors.
//!
//! Kept as plain data so they can be extended and tested without touching
//! the extraction algorithms. Order matters wherever a lookup is
//! "first match wins".

/// Year assumed when no plausible publication year is found.
pub const DEFAULT_YEAR: i32 = 2023;

/// Reference year for the citation age bonus.
pub const CITATION_REFERENCE_YEAR: i32 = 2024;

/// Inclusive bounds of the citation perturbation.
pub const CITATION_JITTER: (i64, i64) = (-200, 1000);

pub const MIN_CITATIONS: i64 = 10;

pub const DEFAULT_TITLE: &str = "Untitled Paper";

/// Characters of content inspected for authors and kept as the abstract.
pub const CONTENT_WINDOW: usize = 500;

pub const MAX_AUTHORS: usize = 5;

pub const MAX_KEYWORDS: usize = 8;

/// Plausible publication years 2000-2029.
pub const YEAR_PATTERN: &str = r"\b(20[0-2][0-9])\b";

/// Author rules, applied in order; the first producing a usable name wins.
///
/// 1. explicit `by` / `author:` / `authors:` prefix followed by a list
/// 2. consecutive capitalized word pairs
/// 3. initial plus surname
pub const AUTHOR_PATTERNS: [&str; 3] = [
    r"\b(?i:by|authors?):?\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*(?:\s*,\s*[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)*)",
    r"([A-Z][a-z]+\s+[A-Z][a-z]+)",
    r"([A-Z]\.\s*[A-Z][a-z]+)",
];

/// Domain substring to venue, used for search results.
pub const SEARCH_VENUES: &[(&str, &str)] = &[
    ("arxiv.org", "arXiv"),
    ("ieee.org", "IEEE"),
    ("acm.org", "ACM"),
    ("springer.com", "Springer"),
    ("elsevier.com", "Elsevier"),
    ("wiley.com", "Wiley"),
    ("nature.com", "Nature"),
    ("science.org", "Science"),
    ("semanticscholar.org", "Semantic Scholar"),
    ("researchgate.net", "ResearchGate"),
    ("openreview.net", "OpenReview"),
];

pub const DEFAULT_SEARCH_VENUE: &str = "Conference/Journal";

/// Domain substring to venue, used for crawl-only URLs.
pub const URL_VENUES: &[(&str, &str)] = &[
    ("arxiv.org", "ArXiv"),
    ("ieee.org", "IEEE"),
    ("acm.org", "ACM"),
    ("springer.com", "Springer"),
    ("nature.com", "Nature"),
    ("science.org", "Science"),
];

pub const DEFAULT_URL_VENUE: &str = "Academic Venue";

pub const BASE_CREDIBILITY: f64 = 5.0;

/// Domain bonus tiers for search results; only the first matching tier applies.
pub const CREDIBILITY_TIERS: &[(&[&str], f64)] = &[
    (&["arxiv.org"], 1.5),
    (&["ieee.org", "acm.org", "nature.com", "science.org"], 2.0),
    (&["springer.com", "elsevier.com"], 1.0),
];

pub const PEER_REVIEW_WORDS: &[&str] = &["citation", "peer-reviewed", "journal"];
pub const PEER_REVIEW_BONUS: f64 = 0.5;

pub const CONFERENCE_WORDS: &[&str] = &["conference", "proceedings", "workshop"];
pub const CONFERENCE_BONUS: f64 = 0.3;

/// Exclusive title length band (in characters) that earns the title bonus.
pub const TITLE_LENGTH_BAND: (usize, usize) = (20, 200);
pub const TITLE_BONUS: f64 = 0.2;

pub const CREDIBILITY_RANGE: (f64, f64) = (1.0, 10.0);

/// Fixed credibility for crawl-only URLs, most specific tier first.
pub const URL_CREDIBILITY_TIERS: &[(&[&str], f64)] = &[
    (&["arxiv.org", "nature.com", "science.org"], 8.5),
    (&["ieee.org", "acm.org", "springer.com"], 7.5),
    (&["scholar.google.com", "semanticscholar.org"], 7.0),
];

pub const DEFAULT_URL_CREDIBILITY: f64 = 6.0;

/// Domain vocabulary scanned, in order, for keyword presence.
pub const KEYWORD_VOCABULARY: &[&str] = &[
    "machine learning",
    "deep learning",
    "neural networks",
    "artificial intelligence",
    "computer vision",
    "natural language processing",
    "nlp",
    "transformer",
    "attention",
    "cnn",
    "rnn",
    "lstm",
    "gpt",
    "bert",
    "gan",
    "reinforcement learning",
    "supervised learning",
    "unsupervised learning",
    "classification",
    "regression",
    "clustering",
    "optimization",
    "algorithm",
    "model",
    "training",
    "inference",
    "dataset",
    "benchmark",
    "evaluation",
    "performance",
    "accuracy",
    "prediction",
];

/// Alphabetic topic words of at least three letters (search path).
pub const TOPIC_WORD_PATTERN: &str = r"\b[a-z]{3,}\b";

/// Word-character topic tokens of at least three characters (crawl path).
pub const URL_TOPIC_WORD_PATTERN: &str = r"\b\w{3,}\b";

/// Keyword injection for crawl URLs: if the URL or topic contains any
/// trigger, the listed keywords are added.
pub const URL_KEYWORD_TRIGGERS: &[(&[&str], &[&str])] = &[
    (&["ml", "machine"], &["machine learning", "ml"]),
    (&["ai", "artificial"], &["artificial intelligence", "ai"]),
    (&["nlp", "language"], &["natural language processing", "nlp"]),
    (&["cv", "vision"], &["computer vision", "cv"]),
];

pub const DEFAULT_URL_TITLE: &str = "Discovered Paper";

/// Rotation of research areas for synthetic backfill.
pub const FALLBACK_AREAS: &[&str] = &[
    "transformer architectures",
    "neural networks",
    "deep learning",
    "machine learning",
    "natural language processing",
    "computer vision",
    "reinforcement learning",
    "generative models",
    "optimization algorithms",
    "representation learning",
];

/// Rotation of venues for synthetic backfill.
pub const FALLBACK_VENUES: &[&str] = &[
    "ArXiv", "ICLR", "NeurIPS", "ICML", "AAAI", "IJCAI", "ACL", "EMNLP",
];

/// First id handed to synthetic papers.
pub const FALLBACK_ID_OFFSET: u32 = 9000;

/// Crawl ids are reduced into this space.
pub const URL_ID_SPACE: u64 = 10_000;
