use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
///
/// Built once at startup and passed by reference into every pipeline run;
/// nothing in here is mutated per request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub papergraph: PapergraphConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub mapping: MappingConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PapergraphConfig {
    pub log_level: String,
    /// Fixed seed for the citation-estimate perturbation. Unset means a
    /// fresh entropy-seeded generator per request.
    pub citation_seed: Option<u64>,
}

impl Default for PapergraphConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            citation_seed: None,
        }
    }
}

/// Keyword search provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Name of the environment variable holding the Tavily API key
    pub api_key_env: String,
    pub base_url: String,
    pub search_depth: String,
    /// Requests always ask for at least this many results
    pub min_results: usize,
    pub timeout_secs: u64,
    pub academic_domains: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key_env: "TAVILY_API_KEY".to_string(),
            base_url: "https://api.tavily.com".to_string(),
            search_depth: "advanced".to_string(),
            min_results: 15,
            timeout_secs: 30,
            academic_domains: to_strings(&[
                "arxiv.org",
                "semanticscholar.org",
                "ieee.org",
                "acm.org",
                "springer.com",
                "wiley.com",
                "elsevier.com",
                "researchgate.net",
                "sciencedirect.com",
                "mdpi.com",
                "nature.com",
                "science.org",
                "cambridge.org",
                "oxford.universitypress.com",
                "openreview.net",
            ]),
        }
    }
}

/// Site mapping (crawl discovery) configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Domains mapped for every discovery request, in order
    pub priority_domains: Vec<String>,
    /// URLs on these domains are flagged as enhanced academic results
    pub academic_domains: Vec<String>,
    pub domain_max_depth: u32,
    pub domain_max_breadth: u32,
    pub domain_limit: u32,
    pub seed_max_depth: u32,
    pub seed_max_breadth: u32,
    pub seed_limit: u32,
    /// How many seed papers get a follow-up mapping pass
    pub max_seed_papers: usize,
    /// Pause after each priority domain call
    pub domain_cooldown_ms: u64,
    /// Pause after each seed follow-up call
    pub seed_cooldown_ms: u64,
    pub select_paths: Vec<String>,
    pub exclude_paths: Vec<String>,
    pub categories: Vec<String>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            priority_domains: to_strings(&[
                "arxiv.org",
                "scholar.google.com",
                "semanticscholar.org",
                "dblp.org",
                "ieee.org",
                "acm.org",
            ]),
            academic_domains: to_strings(&[
                "arxiv.org",
                "scholar.google.com",
                "semanticscholar.org",
                "ieee.org",
                "acm.org",
                "springer.com",
                "sciencedirect.com",
                "wiley.com",
                "nature.com",
                "science.org",
                "openreview.net",
                "researchgate.net",
                "academia.edu",
                "dblp.org",
                "pubmed.ncbi.nlm.nih.gov",
            ]),
            domain_max_depth: 3,
            domain_max_breadth: 35,
            domain_limit: 75,
            seed_max_depth: 2,
            seed_max_breadth: 25,
            seed_limit: 40,
            max_seed_papers: 5,
            domain_cooldown_ms: 1000,
            seed_cooldown_ms: 500,
            select_paths: to_strings(&[
                r"/paper/.*",
                r"/papers/.*",
                r"/publication/.*",
                r"/publications/.*",
                r"/abs/.*",
                r"/pdf/.*",
                r"/article/.*",
                r"/research/.*",
                r"/proceedings/.*",
                r"/conference/.*",
                r"/journal/.*",
                r"/author/.*",
                r"/scholar/.*",
            ]),
            exclude_paths: to_strings(&[
                r"/admin/.*",
                r"/login/.*",
                r"/signup/.*",
                r"/cart/.*",
                r"/checkout/.*",
                r"/marketing/.*",
                r"/ads/.*",
                r"/social/.*",
            ]),
            categories: to_strings(&["Documentation", "Research", "Academic"]),
        }
    }
}

/// Corpus size bounds for crawl-derived papers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Below this, synthetic papers are generated to fill the gap
    pub min_papers: usize,
    /// Deduplication stops accepting papers at this count
    pub max_papers: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            min_papers: 15,
            max_papers: 35,
        }
    }
}

/// Connection graph configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Pairs must score strictly above this to become a connection
    pub similarity_threshold: f64,
    /// Upper bound on the combined paper set fed to the O(n^2) builder
    pub max_papers: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
            max_papers: 50,
        }
    }
}

/// Relationship extractor (LLM) configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key_env: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            model: "gemini-1.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty list allows any origin (local development)
    pub allowed_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: to_strings(&["http://localhost:3000", "http://127.0.0.1:3000"]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in PAPERGRAPH_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory (optional; built-in defaults otherwise)
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config_path = match std::env::var("PAPERGRAPH_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let local = PathBuf::from("config.toml");
                if !local.exists() {
                    log::info!("No config.toml found, using built-in defaults");
                    let config = Config::default();
                    config.validate()?;
                    return Ok(config);
                }
                local
            }
        };

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Missing API keys are not checked here: providers degrade
    /// to empty results instead.
    fn validate(&self) -> Result<()> {
        let threshold = self.graph.similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("graph.similarity_threshold must be between 0.0 and 1.0");
        }

        if self.graph.max_papers == 0 {
            anyhow::bail!("graph.max_papers must be greater than 0");
        }

        if self.corpus.max_papers == 0 {
            anyhow::bail!("corpus.max_papers must be greater than 0");
        }

        if self.corpus.min_papers > self.corpus.max_papers {
            anyhow::bail!("corpus.min_papers must not exceed corpus.max_papers");
        }

        if self.search.timeout_secs == 0 || self.llm.timeout_secs == 0 {
            anyhow::bail!("timeouts must be greater than 0 seconds");
        }

        Ok(())
    }

    /// Read the search API key, if configured
    pub fn search_api_key(&self) -> Option<String> {
        read_key(&self.search.api_key_env)
    }

    /// Read the LLM API key, if configured
    pub fn llm_api_key(&self) -> Option<String> {
        read_key(&self.llm.api_key_env)
    }
}

fn read_key(env_name: &str) -> Option<String> {
    std::env::var(env_name).ok().filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    const TEST_CONFIG: &str = r#"
[papergraph]
log_level = "debug"
citation_seed = 42

[corpus]
min_papers = 10
max_papers = 20

[graph]
similarity_threshold = 0.4

[mapping]
priority_domains = ["arxiv.org"]
domain_cooldown_ms = 0
"#;

    fn with_config_env(config_path: &std::path::Path, f: impl FnOnce()) {
        let original = std::env::var("PAPERGRAPH_CONFIG").ok();
        std::env::set_var("PAPERGRAPH_CONFIG", config_path.to_str().unwrap());
        f();
        std::env::remove_var("PAPERGRAPH_CONFIG");
        if let Some(val) = original {
            std::env::set_var("PAPERGRAPH_CONFIG", val);
        }
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, TEST_CONFIG).unwrap();

        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.papergraph.log_level, "debug");
            assert_eq!(config.papergraph.citation_seed, Some(42));
            assert_eq!(config.corpus.min_papers, 10);
            assert_eq!(config.corpus.max_papers, 20);
            assert_eq!(config.mapping.priority_domains, vec!["arxiv.org".to_string()]);
            assert_eq!(config.mapping.domain_cooldown_ms, 0);
            // Untouched fields keep their defaults
            assert_eq!(config.mapping.seed_cooldown_ms, 500);
            assert_eq!(config.search.api_key_env, "TAVILY_API_KEY");
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let original = std::env::var("PAPERGRAPH_CONFIG").ok();
        std::env::set_var("PAPERGRAPH_CONFIG", "nonexistent.toml");
        let config = Config::load();
        assert!(config.is_err());
        std::env::remove_var("PAPERGRAPH_CONFIG");
        if let Some(v) = original {
            std::env::set_var("PAPERGRAPH_CONFIG", v);
        }
    }

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = Config::default();
        assert_eq!(config.corpus.min_papers, 15);
        assert_eq!(config.corpus.max_papers, 35);
        assert_eq!(config.graph.similarity_threshold, 0.3);
        assert_eq!(config.mapping.domain_cooldown_ms, 1000);
        assert_eq!(config.mapping.seed_cooldown_ms, 500);
        assert_eq!(config.mapping.priority_domains.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.http_server.port, 8000);
        assert_eq!(config.llm.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let err = Config::from_toml_str("[graph]\nsimilarity_threshold = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("similarity_threshold"));
    }

    #[test]
    fn test_min_above_max_rejected() {
        let err = Config::from_toml_str("[corpus]\nmin_papers = 40\nmax_papers = 35\n").unwrap_err();
        assert!(err.to_string().contains("min_papers"));
    }

    #[test]
    fn test_missing_api_key_is_not_an_error() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let config = Config::from_toml_str(
            "[search]\napi_key_env = \"PAPERGRAPH_TEST_UNSET_KEY\"\n",
        )
        .unwrap();
        std::env::remove_var("PAPERGRAPH_TEST_UNSET_KEY");
        assert!(config.search_api_key().is_none());
    }
}
