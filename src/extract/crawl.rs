//! Attribute inference for crawl results, where only a URL is known.

use chrono::Utc;
use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

use super::content::estimate_citations;
use super::patterns::*;
use crate::error::{PapergraphError, Result};
use crate::paper::{DiscoveryMethod, Paper, UNKNOWN_AUTHOR};

fn url_topic_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_TOPIC_WORD_PATTERN).expect("Invalid topic pattern"))
}

/// Build a paper from a discovered URL.
///
/// `academic_domains` marks which URLs count as enhanced academic results.
/// Fails only for a blank URL; callers log and skip those.
pub fn infer_paper_from_url<R: Rng + ?Sized>(
    url: &str,
    topic: &str,
    academic_domains: &[String],
    rng: &mut R,
) -> Result<Paper> {
    let url = url.trim();
    if url.is_empty() {
        return Err(PapergraphError::InvalidInput("empty URL".to_string()));
    }

    let credibility = credibility_for_url(url);
    let enhanced = academic_domains.iter().any(|d| url.contains(d.as_str()));

    Ok(Paper {
        id: url_id(url),
        title: title_from_url(url),
        authors: vec![UNKNOWN_AUTHOR.to_string()],
        venue: venue_for_crawl_url(url).to_string(),
        year: DEFAULT_YEAR,
        citations: estimate_citations(credibility, DEFAULT_YEAR, rng),
        credibility,
        abstract_text: format!("Paper discovered through mapping related to {}", topic),
        keywords: keywords_from_url(url, topic),
        url: url.to_string(),
        discovery_method: DiscoveryMethod::TavilyMap,
        relevance: None,
        enhanced,
        discovered_at: enhanced.then(Utc::now),
    })
}

/// Stable id in `0..10000` derived from the URL.
///
/// Unrelated URLs can collide; ids only need to be distinct enough to label
/// graph nodes within one response.
pub fn url_id(url: &str) -> u32 {
    let digest = Sha256::digest(url.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % URL_ID_SPACE) as u32
}

/// Title guessed from URL path patterns.
pub fn title_from_url(url: &str) -> String {
    if let Some(pos) = url.rfind("/abs/") {
        return format!("ArXiv Paper {}", &url[pos + "/abs/".len()..]);
    }

    if let Some(pos) = url.rfind("/paper/") {
        let tail: String = url[pos + "/paper/".len()..].chars().take(20).collect();
        return format!("Research Paper {}", tail);
    }

    let path = url_path(url);
    let last = path.rsplit('/').next().unwrap_or("");
    let title = title_case(&last.replace(['-', '_'], " "));

    if title.trim().is_empty() {
        DEFAULT_URL_TITLE.to_string()
    } else {
        title
    }
}

fn url_path(url: &str) -> String {
    match ::url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // scheme-less input such as "arxiv.org/list/cs": treat it all as path
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or("")
            .to_string(),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

pub fn venue_for_crawl_url(url: &str) -> &'static str {
    URL_VENUES
        .iter()
        .find(|(domain, _)| url.contains(domain))
        .map(|(_, venue)| *venue)
        .unwrap_or(DEFAULT_URL_VENUE)
}

/// Topic words plus domain keywords triggered by the URL or topic text.
pub fn keywords_from_url(url: &str, topic: &str) -> Vec<String> {
    let topic_lower = topic.to_lowercase();
    let url_lower = url.to_lowercase();

    let mut candidates: Vec<String> = url_topic_word_regex()
        .find_iter(&topic_lower)
        .map(|m| m.as_str().to_string())
        .collect();

    for (triggers, injected) in URL_KEYWORD_TRIGGERS {
        if triggers
            .iter()
            .any(|t| url_lower.contains(t) || topic_lower.contains(t))
        {
            candidates.extend(injected.iter().map(|k| k.to_string()));
        }
    }

    let mut keywords: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
    for candidate in candidates {
        if !keywords.contains(&candidate) {
            keywords.push(candidate);
        }
    }
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Fixed credibility by domain tier, most specific tier first.
pub fn credibility_for_url(url: &str) -> f64 {
    URL_CREDIBILITY_TIERS
        .iter()
        .find(|(domains, _)| domains.iter().any(|d| url.contains(d)))
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_URL_CREDIBILITY)
}
