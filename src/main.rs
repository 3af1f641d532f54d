use anyhow::{Context, Result};
use papergraph::api::{AppState, PapergraphServer};
use papergraph::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", config.papergraph.log_level.as_str())
    ).init();

    log::info!("Starting papergraph v{}", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Search: {}, relationship extraction: {}",
        if config.search_api_key().is_some() { "enabled" } else { "disabled" },
        if config.llm_api_key().is_some() { "enabled" } else { "disabled" }
    );

    let state = AppState::from_config(config).context("Failed to build API clients")?;
    PapergraphServer::new(state).run().await?;

    Ok(())
}
