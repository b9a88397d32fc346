//! Tezos collections through the TzKT indexer.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::{
    ChainFetcher, FetchSource, FetchedCollection, HttpClient, assemble_collection, attributes_from,
    first_url, title_or_token,
};
use crate::config::SOURCES;
use crate::domain::piece::string_or_number;
use crate::domain::{Chain, Collection, Piece};
use crate::utils::resolve_gateway_url;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TzktToken {
    #[serde(default, deserialize_with = "string_or_number")]
    pub token_id: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl TzktToken {
    fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }

    pub fn to_piece(&self) -> Piece {
        let image = first_url([self.meta("displayUri"), self.meta("artifactUri"), self.meta("thumbnailUri")]);
        let thumbnail = first_url([self.meta("thumbnailUri"), self.meta("displayUri")]);
        Piece {
            token_id: self.token_id.clone(),
            title: Some(title_or_token(self.meta("name"), &self.token_id)),
            image: image.map(resolve_gateway_url),
            thumbnail: thumbnail.map(resolve_gateway_url),
            description: self.meta("description").map(str::to_string),
            attributes: attributes_from(self.metadata.as_ref().and_then(|m| m.get("attributes"))),
            ..Default::default()
        }
    }
}

/// TzKT has no collection-level supply, the token count stands in.
pub fn map_collection(tokens: &[TzktToken], contract: &str) -> FetchedCollection {
    let pieces: Vec<Piece> = tokens.iter().map(TzktToken::to_piece).collect();
    let mut marketplaces = BTreeMap::new();
    marketplaces.insert(
        "objkt".to_string(),
        format!("{}{}", SOURCES.marketplaces.objkt, contract),
    );
    FetchedCollection {
        supply: i64::try_from(tokens.len()).ok(),
        pieces,
        marketplaces,
        onchain: false,
    }
}

pub struct TzktFetcher {
    http: HttpClient,
}

impl TzktFetcher {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChainFetcher for TzktFetcher {
    async fn fetch_collection(&self, source: &FetchSource) -> Result<Collection> {
        let contract = source.contract()?;
        let mut tokens: Vec<TzktToken> = Vec::new();
        for page in 0..SOURCES.max_pages {
            let url = format!(
                "{}?contract={}&limit={}&offset={}",
                SOURCES.endpoints.tzkt_tokens_url,
                contract,
                SOURCES.page_limit,
                page * SOURCES.page_limit
            );
            let batch: Vec<TzktToken> = self.http.get_json(&url, "tzkt tokens").await?;
            let full_page = batch.len() as u32 >= SOURCES.page_limit;
            tokens.extend(batch);
            if !full_page {
                break;
            }
        }
        Ok(assemble_collection(source, Chain::Tezos, map_collection(&tokens, contract)))
    }

    fn chain(&self) -> Chain {
        Chain::Tezos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_tokens() {
        let tokens: Vec<TzktToken> = serde_json::from_value(json!([
            {
                "id": 1,
                "tokenId": "3",
                "metadata": {
                    "name": "Tide",
                    "artifactUri": "ipfs://QmArt",
                    "thumbnailUri": "ipfs://QmThumb",
                    "attributes": [{"name": "ignored"}, {"trait_type": "Edition", "value": 1}]
                }
            },
            {"tokenId": "4", "metadata": null}
        ]))
        .unwrap();

        let fetched = map_collection(&tokens, "KT1xyz");
        assert_eq!(fetched.supply, Some(2));
        let tide = &fetched.pieces[0];
        assert_eq!(tide.title.as_deref(), Some("Tide"));
        assert_eq!(tide.image.as_deref(), Some("https://ipfs.io/ipfs/QmArt"));
        assert_eq!(tide.thumbnail.as_deref(), Some("https://ipfs.io/ipfs/QmThumb"));
        assert_eq!(tide.attributes.len(), 2);

        let bare = &fetched.pieces[1];
        assert_eq!(bare.title.as_deref(), Some("#4"));
        assert!(bare.image.is_none());
        assert_eq!(
            fetched.marketplaces.get("objkt").map(String::as_str),
            Some("https://objkt.com/collection/KT1xyz")
        );
    }
}
