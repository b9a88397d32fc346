//! Offline catalog fetcher: chain indexer clients that build `Collection`s.

pub mod alchemy;
pub mod magic_eden;
pub mod net;
pub mod tzkt;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::piece::opt_string_or_number;
use crate::domain::{Attribute, Chain, Collection, Piece};
use crate::utils::slugify;

pub use alchemy::AlchemyFetcher;
pub use magic_eden::MagicEdenFetcher;
pub use net::HttpClient;
pub use tzkt::TzktFetcher;

/// One entry of the sources list the fetch tool works through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSource {
    pub chain: String,
    #[serde(default)]
    pub contract: Option<String>,
    /// Marketplace collection symbol (ordinals)
    #[serde(default)]
    pub collection_slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub artist_note: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub hero_token_id: Option<String>,
    #[serde(default)]
    pub onchain: Option<bool>,
}

impl FetchSource {
    pub fn load_list(path: &Path) -> Result<Vec<FetchSource>> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sources list {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse sources list {:?}", path))
    }

    pub fn chain_kind(&self) -> Option<Chain> {
        Chain::parse(&self.chain)
    }

    pub fn contract(&self) -> Result<&str> {
        self.contract
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| anyhow!("{}: no contract address", self.title))
    }

    pub fn collection_slug(&self) -> Result<&str> {
        self.collection_slug
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| anyhow!("{}: no collection slug", self.title))
    }
}

#[async_trait]
pub trait ChainFetcher: Send + Sync {
    async fn fetch_collection(&self, source: &FetchSource) -> Result<Collection>;

    fn chain(&self) -> Chain;
}

/// What an indexer returned for one collection, before it becomes a `Collection`.
#[derive(Debug, Default)]
pub struct FetchedCollection {
    pub pieces: Vec<Piece>,
    pub supply: Option<i64>,
    pub marketplaces: BTreeMap<String, String>,
    pub onchain: bool,
}

/// Shared assembly: slug id, hero from `heroTokenId` or the first piece, copy the source text.
pub fn assemble_collection(source: &FetchSource, chain: Chain, fetched: FetchedCollection) -> Collection {
    let hero_image = pick_hero(&fetched.pieces, source.hero_token_id.as_deref());
    let supply = fetched
        .supply
        .filter(|s| *s > 0)
        .or_else(|| i64::try_from(fetched.pieces.len()).ok());
    Collection {
        id: slugify(&source.title),
        title: source.title.clone(),
        chain: chain.to_string(),
        supply,
        onchain: source.onchain.unwrap_or(fetched.onchain),
        hero_image,
        pieces: fetched.pieces,
        marketplaces: fetched.marketplaces,
        description: source.description.clone(),
        artist_note: source.artist_note.clone(),
        contract: source.contract.clone(),
        collection_slug: source.collection_slug.clone(),
        ..Default::default()
    }
}

pub fn pick_hero(pieces: &[Piece], hero_token_id: Option<&str>) -> Option<String> {
    hero_token_id
        .and_then(|id| pieces.iter().find(|p| p.token_id == id))
        .and_then(|p| p.image().map(str::to_string))
        .or_else(|| pieces.first().and_then(|p| p.image().map(str::to_string)))
}

/// Metadata name, else `#<tokenId>`.
pub fn title_or_token(name: Option<&str>, token_id: &str) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("#{}", token_id),
    }
}

/// First non-empty candidate.
pub fn first_url<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|u| !u.is_empty())
}

pub fn attributes_from(value: Option<&Value>) -> Vec<Attribute> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Indexers disagree on whether counts are numbers or strings.
pub fn lenient_count(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn piece(token: &str, image: Option<&str>) -> Piece {
        Piece {
            token_id: token.into(),
            image: image.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn sources_list_parses_shipped_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(crate::config::PATHS.fetch_sources);
        let sources = FetchSource::load_list(&path).unwrap();
        assert!(!sources.is_empty());
        assert!(sources.iter().all(|s| s.chain_kind().is_some()));
        assert!(sources.iter().all(|s| s.contract().is_ok() || s.collection_slug().is_ok()));
    }

    #[test]
    fn hero_token_id_accepts_numbers() {
        let source: FetchSource = serde_json::from_value(json!({
            "chain": "tezos", "contract": "KT1abc", "title": "T", "heroTokenId": 7
        }))
        .unwrap();
        assert_eq!(source.hero_token_id.as_deref(), Some("7"));
        assert!(source.collection_slug().is_err());
    }

    #[test]
    fn hero_prefers_named_token() {
        let pieces = vec![piece("1", Some("https://a/1.png")), piece("2", Some("https://a/2.png"))];
        assert_eq!(pick_hero(&pieces, Some("2")).as_deref(), Some("https://a/2.png"));
        assert_eq!(pick_hero(&pieces, Some("9")).as_deref(), Some("https://a/1.png"));
        assert_eq!(pick_hero(&[], None), None);
    }

    #[test]
    fn assembly_fills_ids_and_supply() {
        let source = FetchSource {
            chain: "ethereum".into(),
            contract: Some("0xabc".into()),
            title: "Glitch Bomb".into(),
            onchain: Some(true),
            ..Default::default()
        };
        let fetched = FetchedCollection {
            pieces: vec![piece("1", Some("https://a/1.png"))],
            supply: Some(0),
            ..Default::default()
        };
        let collection = assemble_collection(&source, Chain::Ethereum, fetched);
        assert_eq!(collection.id, "glitch-bomb");
        assert_eq!(collection.chain, "ethereum");
        assert_eq!(collection.supply, Some(1));
        assert!(collection.onchain);
        assert_eq!(collection.hero_image.as_deref(), Some("https://a/1.png"));
        assert_eq!(collection.contract.as_deref(), Some("0xabc"));
    }

    #[test]
    fn helpers_tolerate_odd_shapes() {
        assert_eq!(title_or_token(Some("  "), "5"), "#5");
        assert_eq!(title_or_token(Some("Dawn"), "5"), "Dawn");
        assert_eq!(first_url([None, Some(""), Some("https://x")]), Some("https://x"));
        assert_eq!(lenient_count(Some(&json!("300"))), Some(300));
        assert_eq!(lenient_count(Some(&json!(12))), Some(12));
        assert_eq!(lenient_count(Some(&json!(null))), None);
        let attrs = attributes_from(Some(&json!([{"trait_type": "Bg", "value": "Red"}, 4])));
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].trait_type.as_deref(), Some("Bg"));
    }
}
