//! Attribute extraction from search results (title, free-text content, URL).
//!
//! Every function here is total: malformed or missing input yields a
//! default, never an error.

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

use super::patterns::*;
use crate::paper::{DiscoveryMethod, Paper, SearchRecord, UNKNOWN_AUTHOR};

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(YEAR_PATTERN).expect("Invalid year pattern"))
}

fn author_regexes() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        AUTHOR_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("Invalid author pattern"))
            .collect()
    })
}

fn topic_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOPIC_WORD_PATTERN).expect("Invalid topic pattern"))
}

/// Build a paper from one search record.
///
/// `id` is assigned by the caller (sequential, 1-based, in result order).
pub fn extract_paper<R: Rng + ?Sized>(
    id: u32,
    record: &SearchRecord,
    topic: &str,
    rng: &mut R,
) -> Paper {
    let title = record
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();
    let content = record.content.as_deref().unwrap_or("");
    let url = record.url.as_deref().unwrap_or("").to_string();

    let year = extract_year(content, &title);
    let credibility = calculate_credibility(content, &url, &title);

    Paper {
        id,
        authors: extract_authors(content),
        venue: venue_for_url(&url).to_string(),
        year,
        citations: estimate_citations(credibility, year, rng),
        credibility: (credibility * 10.0).round() / 10.0,
        abstract_text: make_abstract(content),
        keywords: extract_keywords(content, &title, topic),
        discovery_method: DiscoveryMethod::TavilySearch,
        relevance: record.score,
        enhanced: false,
        discovered_at: None,
        url,
        title,
    }
}

/// Largest plausible publication year in content and title, or the default.
pub fn extract_year(content: &str, title: &str) -> i32 {
    let text = format!("{} {}", content, title);
    year_regex()
        .captures_iter(&text)
        .filter_map(|cap| cap.get(1)?.as_str().parse::<i32>().ok())
        .max()
        .unwrap_or(DEFAULT_YEAR)
}

/// Author names from the opening of the content.
///
/// Rules are tried in order and the first yielding a usable name wins.
/// At most the first five candidates are considered; each must be strictly
/// between 3 and 50 characters long.
pub fn extract_authors(content: &str) -> Vec<String> {
    let window = truncate_chars(content, CONTENT_WINDOW);

    for regex in author_regexes() {
        let candidates: Vec<&str> = regex
            .captures_iter(window)
            .flat_map(|caps| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
            })
            // the explicit-prefix rule captures a whole comma separated list
            .flat_map(|group| group.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();

        let authors: Vec<String> = candidates
            .into_iter()
            .take(MAX_AUTHORS)
            .filter(|name| {
                let len = name.chars().count();
                len > 3 && len < 50
            })
            .map(str::to_string)
            .collect();

        if !authors.is_empty() {
            return authors;
        }
    }

    vec![UNKNOWN_AUTHOR.to_string()]
}

/// Venue from the first matching domain in the search venue table.
pub fn venue_for_url(url: &str) -> &'static str {
    SEARCH_VENUES
        .iter()
        .find(|(domain, _)| url.contains(domain))
        .map(|(_, venue)| *venue)
        .unwrap_or(DEFAULT_SEARCH_VENUE)
}

/// Credibility score in [1.0, 10.0] from domain tier and content signals.
pub fn calculate_credibility(content: &str, url: &str, title: &str) -> f64 {
    let mut score = BASE_CREDIBILITY;

    if let Some((_, bonus)) = CREDIBILITY_TIERS
        .iter()
        .find(|(domains, _)| domains.iter().any(|d| url.contains(d)))
    {
        score += bonus;
    }

    let content_lower = content.to_lowercase();
    if PEER_REVIEW_WORDS.iter().any(|w| content_lower.contains(w)) {
        score += PEER_REVIEW_BONUS;
    }
    if CONFERENCE_WORDS.iter().any(|w| content_lower.contains(w)) {
        score += CONFERENCE_BONUS;
    }

    let title_len = title.chars().count();
    if title_len > TITLE_LENGTH_BAND.0 && title_len < TITLE_LENGTH_BAND.1 {
        score += TITLE_BONUS;
    }

    score.clamp(CREDIBILITY_RANGE.0, CREDIBILITY_RANGE.1)
}

/// Presentation-only citation estimate; never below `MIN_CITATIONS`.
pub fn estimate_citations<R: Rng + ?Sized>(credibility: f64, year: i32, rng: &mut R) -> i64 {
    let age = i64::from((CITATION_REFERENCE_YEAR - year).max(1));
    let base = (credibility * 100.0) as i64;
    let age_bonus = (age * 50).min(500);
    let jitter = rng.gen_range(CITATION_JITTER.0..=CITATION_JITTER.1);
    (base + age_bonus + jitter).max(MIN_CITATIONS)
}

/// Vocabulary hits in order, then unseen topic words, capped at eight.
pub fn extract_keywords(content: &str, title: &str, topic: &str) -> Vec<String> {
    let text = format!("{} {} {}", content, title, topic).to_lowercase();

    let mut keywords: Vec<String> = KEYWORD_VOCABULARY
        .iter()
        .filter(|kw| text.contains(*kw))
        .map(|kw| kw.to_string())
        .collect();

    let topic_lower = topic.to_lowercase();
    for word in topic_word_regex().find_iter(&topic_lower) {
        let word = word.as_str();
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// First 500 characters of content, with "..." when truncated.
pub fn make_abstract(content: &str) -> String {
    let head = truncate_chars(content, CONTENT_WINDOW);
    if head.len() < content.len() {
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

/// Prefix of at most `max` characters, cut on a char boundary.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
