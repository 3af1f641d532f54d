use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::types::*;
use crate::config::Config;
use crate::discovery::{discover_with_mapping, search_papers, search_with_analysis};
use crate::error::{PapergraphError, Result};
use crate::providers::{
    GeminiExtractor, RelationshipExtractor, SearchProvider, SiteMapper, TavilyClient,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    search: Arc<dyn SearchProvider>,
    mapper: Arc<dyn SiteMapper>,
    extractor: Arc<dyn RelationshipExtractor>,
}

impl AppState {
    pub fn new(
        config: Config,
        search: Arc<dyn SearchProvider>,
        mapper: Arc<dyn SiteMapper>,
        extractor: Arc<dyn RelationshipExtractor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            search,
            mapper,
            extractor,
        }
    }

    /// Build the Tavily and Gemini clients from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let tavily = Arc::new(TavilyClient::from_config(&config)?);
        let gemini = Arc::new(GeminiExtractor::from_config(&config)?);
        Ok(Self::new(config, tavily.clone(), tavily, gemini))
    }

    /// Fresh RNG per request; seeded when `papergraph.citation_seed` is set.
    fn rng(&self) -> StdRng {
        match self.config.papergraph.citation_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// HTTP API server
pub struct PapergraphServer {
    state: AppState,
}

impl PapergraphServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind to the configured host and port and serve until shutdown.
    pub async fn run(&self) -> Result<()> {
        let http = &self.state.config.http_server;
        let addr = format!("{}:{}", http.host, http.port);

        let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
            PapergraphError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to bind to {}: {}", addr, e),
            ))
        })?;

        log::info!("Starting papergraph API on http://{}", addr);

        axum::serve(listener, self.router()).await.map_err(|e| {
            PapergraphError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("HTTP server error: {}", e),
            ))
        })?;

        Ok(())
    }

    pub fn router(&self) -> Router {
        let allowed_origins = &self.state.config.http_server.allowed_origins;

        let cors = if allowed_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<axum::http::HeaderValue> = allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/", get(handle_root))
            .route("/health", get(handle_health))
            .route("/search-papers", post(handle_search))
            .route("/search-papers-simple", get(handle_search_simple))
            .route("/search-papers-with-analysis", post(handle_search_with_analysis))
            .route("/discover-papers-with-mapping", post(handle_discover_with_mapping))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors),
            )
            .with_state(self.state.clone())
    }
}

fn error_response(err: PapergraphError) -> Response {
    let status = match err {
        PapergraphError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        log::error!("Request failed: {}", err);
    }

    (
        status,
        Json(serde_json::json!({
            "detail": format!("Search failed: {}", err)
        })),
    )
        .into_response()
}

/// Rejects blank topics and unconfigured search before any work starts.
fn check_request(state: &AppState, topic: &str) -> Result<()> {
    if topic.trim().is_empty() {
        return Err(PapergraphError::InvalidInput("topic must not be empty".to_string()));
    }
    if !state.search.is_configured() {
        return Err(PapergraphError::Config(format!(
            "{} not configured",
            state.config.search.api_key_env
        )));
    }
    Ok(())
}

async fn handle_root() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "papergraph API is running",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
        .into_response()
}

async fn handle_health(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "api_key_configured": state.search.is_configured()
        })),
    )
        .into_response()
}

async fn run_search(state: &AppState, request: SearchRequest) -> Response {
    if let Err(e) = check_request(state, &request.topic) {
        return error_response(e);
    }

    let mut rng = state.rng();
    match search_papers(
        &request.topic,
        request.max_results,
        &state.config.search,
        state.search.as_ref(),
        &mut rng,
    )
    .await
    {
        Ok(papers) => Json(SearchResponse::new(&request.topic, papers)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Response {
    run_search(&state, request).await
}

async fn handle_search_simple(
    State(state): State<AppState>,
    Query(query): Query<SimpleSearchQuery>,
) -> Response {
    let request = SearchRequest {
        topic: query.topic,
        max_results: 10,
    };
    run_search(&state, request).await
}

async fn handle_search_with_analysis(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Response {
    if let Err(e) = check_request(&state, &request.topic) {
        return error_response(e);
    }

    let mut rng = state.rng();
    match search_with_analysis(
        &request.topic,
        request.max_results,
        &state.config,
        state.search.as_ref(),
        state.extractor.as_ref(),
        &mut rng,
    )
    .await
    {
        Ok(outcome) => Json(AnalysisResponse::new(&request.topic, outcome)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn handle_discover_with_mapping(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Response {
    if let Err(e) = check_request(&state, &request.topic) {
        return error_response(e);
    }

    let mut rng = state.rng();
    match discover_with_mapping(
        &request.topic,
        request.max_results,
        &state.config,
        state.search.as_ref(),
        state.mapper.as_ref(),
        state.extractor.as_ref(),
        &mut rng,
    )
    .await
    {
        Ok(outcome) => Json(MappingResponse::new(&request.topic, outcome)).into_response(),
        Err(e) => error_response(e),
    }
}
