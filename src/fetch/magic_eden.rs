//! Bitcoin ordinals collections through the Magic Eden API.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::{
    ChainFetcher, FetchSource, FetchedCollection, HttpClient, assemble_collection, attributes_from,
    title_or_token,
};
use crate::config::{MEDIA, SOURCES};
use crate::domain::{Chain, Collection, Piece};

#[derive(Debug, Default, Deserialize)]
pub struct TokenPage {
    #[serde(default)]
    pub tokens: Vec<OrdinalToken>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdinalToken {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub inscription_number: Option<i64>,
    #[serde(default)]
    pub meta: Option<Value>,
}

impl OrdinalToken {
    /// Inscription content is served as-is; it is both the still and the live piece.
    pub fn to_piece(&self) -> Piece {
        let content = format!("{}{}", MEDIA.ordinals_content_base, self.id);
        let name = self.meta.as_ref().and_then(|m| m.get("name")).and_then(Value::as_str);
        let number = self
            .inscription_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| self.id.clone());
        Piece {
            token_id: self.id.clone(),
            title: Some(title_or_token(name, &number)),
            image: Some(content.clone()),
            animation_url: Some(content),
            inscription_number: self.inscription_number,
            attributes: attributes_from(self.meta.as_ref().and_then(|m| m.get("attributes"))),
            ..Default::default()
        }
    }
}

pub fn map_collection(tokens: &[OrdinalToken], slug: &str) -> FetchedCollection {
    let pieces: Vec<Piece> = tokens
        .iter()
        .filter(|t| !t.id.is_empty())
        .map(OrdinalToken::to_piece)
        .collect();
    let mut marketplaces = BTreeMap::new();
    marketplaces.insert(
        "magicEden".to_string(),
        format!("{}{}", SOURCES.marketplaces.magic_eden, slug),
    );
    FetchedCollection {
        supply: i64::try_from(pieces.len()).ok(),
        pieces,
        marketplaces,
        onchain: true,
    }
}

pub struct MagicEdenFetcher {
    http: HttpClient,
}

impl MagicEdenFetcher {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChainFetcher for MagicEdenFetcher {
    async fn fetch_collection(&self, source: &FetchSource) -> Result<Collection> {
        let slug = source.collection_slug()?;
        let url = format!(
            "{}?collectionSymbol={}&limit={}",
            SOURCES.endpoints.magic_eden_tokens_url, slug, SOURCES.page_limit
        );
        let page: TokenPage = self.http.get_json(&url, "magic eden tokens").await?;
        Ok(assemble_collection(source, Chain::Ordinals, map_collection(&page.tokens, slug)))
    }

    fn chain(&self) -> Chain {
        Chain::Ordinals
    }
}
