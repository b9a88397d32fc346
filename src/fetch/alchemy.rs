//! Ethereum collections through the Alchemy NFT API (v3).

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::{
    ChainFetcher, FetchSource, FetchedCollection, HttpClient, assemble_collection, attributes_from,
    first_url, lenient_count, title_or_token,
};
use crate::config::SOURCES;
use crate::domain::piece::string_or_number;
use crate::domain::{Chain, Collection, Piece};
use crate::utils::resolve_gateway_url;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_supply: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftPage {
    #[serde(default)]
    pub nfts: Vec<AlchemyNft>,
    #[serde(default)]
    pub page_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlchemyNft {
    #[serde(default, deserialize_with = "string_or_number")]
    pub token_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<AlchemyMedia>,
    #[serde(default)]
    pub animation: Option<AlchemyMedia>,
    #[serde(default)]
    pub raw: Option<AlchemyRaw>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlchemyMedia {
    #[serde(default)]
    pub cached_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlchemyRaw {
    #[serde(default)]
    pub metadata: Value,
}

impl AlchemyNft {
    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.raw.as_ref()?.metadata.get(key)?.as_str()
    }

    pub fn to_piece(&self) -> Piece {
        let image = self.image.as_ref();
        let animation = self.animation.as_ref();

        let still = first_url([
            image.and_then(|m| m.cached_url.as_deref()),
            image.and_then(|m| m.original_url.as_deref()),
            self.metadata_str("image"),
        ]);
        let thumbnail = first_url([
            image.and_then(|m| m.thumbnail_url.as_deref()),
            image.and_then(|m| m.cached_url.as_deref()),
        ]);
        let animation_url = first_url([
            animation.and_then(|m| m.cached_url.as_deref()),
            self.metadata_str("animation_url"),
        ]);

        Piece {
            token_id: self.token_id.clone(),
            title: Some(title_or_token(
                self.name.as_deref().or(self.metadata_str("name")),
                &self.token_id,
            )),
            image: still.map(resolve_gateway_url),
            thumbnail: thumbnail.map(resolve_gateway_url),
            animation_url: animation_url.map(resolve_gateway_url),
            description: self
                .description
                .clone()
                .or_else(|| self.metadata_str("description").map(str::to_string)),
            attributes: attributes_from(self.raw.as_ref().and_then(|r| r.metadata.get("attributes"))),
            ..Default::default()
        }
    }
}

pub fn map_collection(metadata: &ContractMetadata, nfts: &[AlchemyNft], contract: &str) -> FetchedCollection {
    let pieces: Vec<Piece> = nfts.iter().map(AlchemyNft::to_piece).collect();
    let mut marketplaces = BTreeMap::new();
    marketplaces.insert(
        "opensea".to_string(),
        format!("{}{}", SOURCES.marketplaces.opensea, contract),
    );
    FetchedCollection {
        supply: lenient_count(metadata.total_supply.as_ref()),
        pieces,
        marketplaces,
        onchain: false,
    }
}

pub struct AlchemyFetcher {
    http: HttpClient,
    api_key: String,
}

impl AlchemyFetcher {
    pub fn new(http: HttpClient, api_key: String) -> Self {
        Self { http, api_key }
    }

    fn base_url(&self) -> String {
        format!("{}{}", SOURCES.endpoints.alchemy_base_url, self.api_key)
    }

    async fn fetch_all_nfts(&self, contract: &str) -> Result<Vec<AlchemyNft>> {
        let mut nfts = Vec::new();
        let mut page_key: Option<String> = None;
        for _ in 0..SOURCES.max_pages {
            let mut url = format!(
                "{}/getNFTsForContract?contractAddress={}&withMetadata=true&limit={}",
                self.base_url(),
                contract,
                SOURCES.page_limit
            );
            if let Some(key) = &page_key {
                url.push_str("&pageKey=");
                url.push_str(key);
            }
            let page: NftPage = self.http.get_json(&url, "alchemy getNFTsForContract").await?;
            nfts.extend(page.nfts);
            match page.page_key.filter(|k| !k.is_empty()) {
                Some(next) => page_key = Some(next),
                None => break,
            }
        }
        Ok(nfts)
    }
}

#[async_trait]
impl ChainFetcher for AlchemyFetcher {
    async fn fetch_collection(&self, source: &FetchSource) -> Result<Collection> {
        let contract = source.contract()?;
        let metadata_url = format!("{}/getContractMetadata?contractAddress={}", self.base_url(), contract);
        let metadata: ContractMetadata = self
            .http
            .get_json(&metadata_url, "alchemy getContractMetadata")
            .await?;
        let nfts = self.fetch_all_nfts(contract).await?;
        Ok(assemble_collection(
            source,
            Chain::Ethereum,
            map_collection(&metadata, &nfts, contract),
        ))
    }

    fn chain(&self) -> Chain {
        Chain::Ethereum
    }
}
