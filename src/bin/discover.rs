use anyhow::{Context, Result};
use clap::Parser;
use papergraph::discovery::{discover_with_mapping, search_papers, search_with_analysis};
use papergraph::providers::{GeminiExtractor, TavilyClient};
use papergraph::Config;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "discover")]
#[command(about = "Discover research papers on a topic and print them as JSON")]
struct Args {
    /// Research topic
    topic: String,

    /// Number of search results to request (at least the configured minimum is used)
    #[arg(short, long, default_value_t = 10)]
    max_results: usize,

    /// Also crawl academic sites outward from the search results
    #[arg(long)]
    map: bool,

    /// Ask the LLM for relationships between the papers
    #[arg(long)]
    analyze: bool,

    /// Seed for citation estimates (overrides papergraph.citation_seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();
    if args.topic.trim().is_empty() {
        anyhow::bail!("Topic cannot be empty");
    }

    let config = Config::load()?;
    let tavily = TavilyClient::from_config(&config).context("Failed to build search client")?;

    let mut rng = match args.seed.or(config.papergraph.citation_seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();

    let output = if args.map {
        let gemini = GeminiExtractor::from_config(&config).context("Failed to build LLM client")?;
        let outcome = discover_with_mapping(
            &args.topic,
            args.max_results,
            &config,
            &tavily,
            &tavily,
            &gemini,
            &mut rng,
        )
        .await?;
        serde_json::to_value(outcome)?
    } else if args.analyze {
        let gemini = GeminiExtractor::from_config(&config).context("Failed to build LLM client")?;
        let outcome = search_with_analysis(
            &args.topic,
            args.max_results,
            &config,
            &tavily,
            &gemini,
            &mut rng,
        )
        .await?;
        serde_json::to_value(outcome)?
    } else {
        let papers = search_papers(&args.topic, args.max_results, &config.search, &tavily, &mut rng).await?;
        serde_json::to_value(papers)?
    };

    log::info!("Discovery finished in {:?}", start.elapsed());

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}
