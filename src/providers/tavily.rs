use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{MapRequest, SearchProvider, SiteMapper};
use crate::config::Config;
use crate::error::{PapergraphError, Result};
use crate::paper::SearchRecord;

#[derive(Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
    include_raw_content: bool,
    include_domains: &'a [String],
}

#[derive(Deserialize)]
struct SearchReply {
    #[serde(default)]
    results: Vec<SearchRecord>,
}

#[derive(Serialize)]
struct MapBody<'a> {
    url: &'a str,
    max_depth: u32,
    max_breadth: u32,
    limit: u32,
    instructions: &'a str,
    select_paths: &'a [String],
    exclude_paths: &'a [String],
    allow_external: bool,
    categories: &'a [String],
}

#[derive(Deserialize)]
struct MapReply {
    #[serde(default)]
    results: Vec<String>,
}

/// Tavily search and map client.
///
/// Built without an API key the client is disabled: every call logs a
/// warning and returns an empty result.
pub struct TavilyClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    search_depth: String,
    categories: Vec<String>,
}

impl TavilyClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        search_depth: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            search_depth: search_depth.into(),
            categories: Vec::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.search_api_key();
        if api_key.is_none() {
            log::warn!(
                "{} not set, search and mapping are disabled",
                config.search.api_key_env
            );
        }

        let mut client = Self::new(
            api_key,
            config.search.base_url.clone(),
            config.search.search_depth.clone(),
            Duration::from_secs(config.search.timeout_secs),
        )?;
        client.categories = config.mapping.categories.clone();
        Ok(client)
    }

    async fn post<B, R>(&self, api_key: &str, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(PapergraphError::Provider(format!(
                "Tavily {} error {}: {}",
                endpoint, status, body
            )));
        }

        response.json().await.map_err(|e| {
            PapergraphError::Parse(format!("Failed to parse Tavily {} response: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(
        &self,
        query: &str,
        domains: &[String],
        limit: usize,
        include_raw_content: bool,
    ) -> Result<Vec<SearchRecord>> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::warn!("Tavily client not configured, skipping search for {}", query);
            return Ok(Vec::new());
        };

        let body = SearchBody {
            query,
            search_depth: &self.search_depth,
            max_results: limit,
            include_raw_content,
            include_domains: domains,
        };

        let reply: SearchReply = self.post(api_key, "search", &body).await?;
        log::info!("Search returned {} results for {}", reply.results.len(), query);
        Ok(reply.results)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SiteMapper for TavilyClient {
    async fn map(&self, request: &MapRequest) -> Result<Vec<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::warn!("Tavily client not configured, skipping map of {}", request.seed_url);
            return Ok(Vec::new());
        };

        let body = MapBody {
            url: &request.seed_url,
            max_depth: request.max_depth,
            max_breadth: request.max_breadth,
            limit: request.limit,
            instructions: &request.instructions,
            select_paths: &request.select_paths,
            exclude_paths: &request.exclude_paths,
            allow_external: true,
            categories: &self.categories,
        };

        let reply: MapReply = self.post(api_key, "map", &body).await?;
        log::info!(
            "Discovered {} URLs from {}",
            reply.results.len(),
            request.seed_url
        );
        Ok(reply.results)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled() -> TavilyClient {
        TavilyClient::new(None, "https://api.tavily.com/", "advanced", Duration::from_secs(1)).unwrap()
    }

    #[tokio::test]
    async fn test_disabled_search_returns_empty() {
        let client = disabled();
        assert!(!SearchProvider::is_configured(&client));
        let results = client.search("anything", &[], 15, true).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_map_returns_empty() {
        let client = disabled();
        let request = MapRequest {
            seed_url: "arxiv.org".to_string(),
            ..MapRequest::default()
        };
        assert!(client.map(&request).await.unwrap().is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(disabled().base_url, "https://api.tavily.com");
    }

    #[test]
    fn test_search_reply_parsing() {
        let reply: SearchReply = serde_json::from_str(
            r#"{"query": "q", "results": [
                {"title": "Paper", "url": "https://arxiv.org/abs/1", "content": "body", "score": 0.9, "raw_content": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(reply.results.len(), 1);
        assert_eq!(reply.results[0].title.as_deref(), Some("Paper"));
        assert_eq!(reply.results[0].score, Some(0.9));
    }

    #[test]
    fn test_map_reply_parsing() {
        let reply: MapReply = serde_json::from_str(
            r#"{"base_url": "arxiv.org", "results": ["https://arxiv.org/abs/1"], "response_time": 1.2}"#,
        )
        .unwrap();
        assert_eq!(reply.results, vec!["https://arxiv.org/abs/1"]);
    }

    #[test]
    fn test_search_body_serialization() {
        let domains = vec!["arxiv.org".to_string()];
        let body = SearchBody {
            query: "q",
            search_depth: "advanced",
            max_results: 15,
            include_raw_content: true,
            include_domains: &domains,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["max_results"], 15);
        assert_eq!(value["include_domains"][0], "arxiv.org");
    }
}
