use anyhow::{Context, Result};
use clap::Parser;
use solemn_gallery::CatalogFile;
use solemn_gallery::config::{PATHS, SOURCES};
use solemn_gallery::domain::{Chain, Collection};
use solemn_gallery::fetch::{
    AlchemyFetcher, ChainFetcher, FetchSource, HttpClient, MagicEdenFetcher, TzktFetcher,
};
use solemn_gallery::utils::TimeUtils;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Rebuild the gallery catalog from the chain indexers")]
struct FetchCli {
    /// Collections to query
    #[arg(long, default_value = PATHS.fetch_sources)]
    sources: PathBuf,

    /// Where the generated catalog is written
    #[arg(long, default_value = PATHS.generated_catalog)]
    output: PathBuf,

    /// Needed for Ethereum collections; those are skipped without it
    #[arg(long, env = "ALCHEMY_API_KEY")]
    alchemy_key: Option<String>,

    /// Pause between two collections
    #[arg(long, default_value_t = SOURCES.client.collection_delay_ms)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = FetchCli::parse();

    let sources = FetchSource::load_list(&args.sources)?;
    println!("Loaded {} sources from {:?}", sources.len(), args.sources);

    let http = HttpClient::new()?;
    let mut fetchers: Vec<Box<dyn ChainFetcher>> = vec![
        Box::new(TzktFetcher::new(http.clone())),
        Box::new(MagicEdenFetcher::new(http.clone())),
    ];
    match args.alchemy_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => fetchers.push(Box::new(AlchemyFetcher::new(http, key))),
        None => log::warn!("No Alchemy key given, Ethereum collections will be skipped"),
    }

    let mut collections: Vec<Collection> = Vec::new();
    for (i, source) in sources.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
        }
        log::info!("Fetching {} ({})", source.title, source.chain);
        match fetch_one(&fetchers, source).await {
            Ok(collection) => {
                println!(
                    "  {:<32} {:<9} {:>5} pieces",
                    collection.title,
                    collection.chain_badge(),
                    collection.pieces.len()
                );
                collections.push(collection);
            }
            Err(e) => log::error!("Skipping {}: {:#}", source.title, e),
        }
    }

    let written = collections.len();
    let output = CatalogFile::new(collections);
    output
        .save_to_path(&args.output)
        .with_context(|| format!("Failed to write catalog {:?}", args.output))?;

    println!(
        "✅ Catalog written to {:?} at {} with {} collections ({} skipped).",
        args.output,
        TimeUtils::format_timestamp_ms(output.generated_at_ms),
        written,
        sources.len() - written
    );
    Ok(())
}

async fn fetch_one(fetchers: &[Box<dyn ChainFetcher>], source: &FetchSource) -> Result<Collection> {
    let chain: Chain = source
        .chain_kind()
        .with_context(|| format!("unknown chain {:?}", source.chain))?;
    let fetcher = fetchers
        .iter()
        .find(|f| f.chain() == chain)
        .with_context(|| format!("no fetcher available for {}", chain))?;
    fetcher.fetch_collection(source).await
}
