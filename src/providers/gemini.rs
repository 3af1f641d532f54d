use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::RelationshipExtractor;
use crate::config::Config;
use crate::error::{PapergraphError, Result};
use crate::graph::GraphData;
use crate::paper::PaperSummary;

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Gemini-backed relationship extractor.
///
/// Without an API key every call fails with [`PapergraphError::Analyzer`];
/// callers substitute the empty graph.
pub struct GeminiExtractor {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiExtractor {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.llm_api_key();
        if api_key.is_none() {
            log::warn!(
                "{} not set, relationship extraction is disabled",
                config.llm.api_key_env
            );
        }

        Self::new(
            api_key,
            config.llm.base_url.clone(),
            config.llm.model.clone(),
            Duration::from_secs(config.llm.timeout_secs),
        )
    }

    async fn generate(&self, api_key: &str, prompt: String) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(PapergraphError::Analyzer(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| PapergraphError::Parse(format!("Failed to parse Gemini response: {}", e)))?;

        let text: String = reply
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(PapergraphError::Analyzer(
                "Gemini returned no text".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl RelationshipExtractor for GeminiExtractor {
    async fn analyze(&self, papers: &[PaperSummary]) -> Result<GraphData> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(PapergraphError::Analyzer(
                "LLM API key not configured".to_string(),
            ));
        };

        if papers.is_empty() {
            return Ok(GraphData::empty());
        }

        let started = std::time::Instant::now();
        let reply = self.generate(api_key, build_prompt(papers)?).await?;
        let graph = parse_graph_reply(&reply)?;

        log::debug!(
            "Relationship extraction over {} papers took {:?}",
            papers.len(),
            started.elapsed()
        );
        log::info!(
            "Extracted {} nodes, {} edges, {} clusters",
            graph.nodes.len(),
            graph.edges.len(),
            graph.entity_clusters.len()
        );
        Ok(graph)
    }
}

fn build_prompt(papers: &[PaperSummary]) -> Result<String> {
    let papers_json = serde_json::to_string_pretty(papers)?;

    Ok(format!(
        r#"You are a research analyst building a knowledge graph of academic papers.

Given the papers below, identify the relationships between them and the key
entities (methods, datasets, tasks, concepts) they share.

Papers:
{papers_json}

Respond with JSON only, using exactly this structure:
{{
  "nodes": [
    {{"id": "<paper id>", "title": "...", "type": "paper", "entities": ["..."]}}
  ],
  "edges": [
    {{
      "source": "<paper id>",
      "target": "<paper id>",
      "relationship_type": "Builds_Upon | Extends | Contradicts | Applies | Compares | Shares_Method | Shares_Dataset",
      "strength": <integer 1-5>,
      "description": "one sentence",
      "shared_entities": ["..."]
    }}
  ],
  "entity_clusters": [
    {{"name": "...", "entities": ["..."], "papers": ["<paper id>"]}}
  ]
}}"#
    ))
}

/// Parse the model's reply, tolerating a surrounding fenced code block or
/// prose before and after the JSON object.
pub(crate) fn parse_graph_reply(reply: &str) -> Result<GraphData> {
    let body = strip_code_fence(reply.trim());

    let json = match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => {
            return Err(PapergraphError::Analyzer(
                "LLM reply contained no JSON object".to_string(),
            ))
        }
    };

    Ok(serde_json::from_str(json)?)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop the language tag line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
