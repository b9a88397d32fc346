use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use super::chain::{Chain, chain_badge, chain_label, null_as_default};
use super::piece::{Piece, non_empty};
use crate::config::{GALLERY, MEDIA};

/// A named set of pieces sharing an origin and chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chain: String,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub supply: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub onchain: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_editions: Option<bool>,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    /// Inscription used for the hero when the collection has no explicit image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pieces: Vec<Piece>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marketplaces: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_slug: Option<String>,

    /// Set by the catalog when `pieces` only holds the stand-in built from the hero
    #[serde(skip)]
    pub representative_only: bool,
}

impl Collection {
    pub fn chain_kind(&self) -> Option<Chain> {
        Chain::parse(&self.chain)
    }

    pub fn is_ordinals(&self) -> bool {
        self.chain_kind() == Some(Chain::Ordinals)
    }

    pub fn chain_badge(&self) -> String {
        chain_badge(&self.chain)
    }

    pub fn chain_label(&self) -> String {
        chain_label(&self.chain)
    }

    pub fn year_or_default(&self) -> i64 {
        self.year.unwrap_or(GALLERY.defaults.year as i64)
    }

    /// Hero image: explicit URL, else the ordinals content URL of the representative inscription.
    pub fn hero_url(&self) -> Option<String> {
        if let Some(url) = non_empty(&self.hero_image) {
            return Some(url.to_string());
        }
        match non_empty(&self.representative_id) {
            Some(id) if self.is_ordinals() => Some(format!("{}{}", MEDIA.ordinals_content_base, id)),
            _ => None,
        }
    }

    pub fn has_pieces(&self) -> bool {
        !self.pieces.is_empty()
    }

    /// Pieces that came from the catalog, excluding a synthesised stand-in.
    pub fn real_piece_count(&self) -> usize {
        if self.representative_only {
            0
        } else {
            self.pieces.len()
        }
    }

    pub fn unique_piece_count(&self) -> usize {
        if self.representative_only {
            return 1;
        }
        self.pieces
            .iter()
            .map(|p| p.token_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Editions collection: the explicit flag wins, otherwise the supply must
    /// strictly exceed the number of distinct pieces.
    pub fn is_edition_collection(&self) -> bool {
        if let Some(explicit) = self.is_editions {
            return explicit;
        }
        match self.supply {
            Some(supply) if supply > 0 => supply > self.unique_piece_count() as i64,
            _ => false,
        }
    }

    /// Count for the detail metadata block: supply, else piece count, else "?".
    pub fn supply_label(&self) -> String {
        match (self.supply.filter(|s| *s > 0), self.real_piece_count()) {
            (Some(supply), _) => supply.to_string(),
            (None, count) if count > 0 => count.to_string(),
            _ => GALLERY.defaults.unknown_count_label.to_string(),
        }
    }

    /// Count for the timeline: piece count, else supply, else "?".
    pub fn count_label(&self) -> String {
        match (self.real_piece_count(), self.supply.filter(|s| *s > 0)) {
            (count, _) if count > 0 => count.to_string(),
            (_, Some(supply)) => supply.to_string(),
            _ => GALLERY.defaults.unknown_count_label.to_string(),
        }
    }

    /// Title for a piece within this collection, falling back to the collection title.
    pub fn piece_title(&self, piece: &Piece) -> String {
        let indicator = piece.indicator();
        if self.representative_only || indicator.is_empty() {
            self.title.clone()
        } else {
            indicator
        }
    }

    /// Build the stand-in piece for a collection that only has a hero image.
    ///
    /// Returns false when there is nothing to show.
    pub(crate) fn synthesise_representative(&mut self) -> bool {
        if self.has_pieces() {
            return false;
        }
        let Some(hero) = self.hero_url() else {
            return false;
        };
        let token_id = non_empty(&self.representative_id)
            .map(str::to_string)
            .unwrap_or_else(|| self.id.clone());
        let animation_url = (self.onchain && self.is_ordinals()).then(|| hero.clone());
        self.pieces.push(Piece {
            token_id,
            image: Some(hero),
            animation_url,
            ..Default::default()
        });
        self.representative_only = true;
        true
    }
}

/// Numbers that may arrive as strings ("50") or be absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(token_id: &str) -> Piece {
        Piece {
            token_id: token_id.to_string(),
            image: Some(format!("https://media.example/{token_id}.png")),
            ..Default::default()
        }
    }

    #[test]
    fn malformed_entry_parses_with_defaults() {
        let collection: Collection = serde_json::from_str(
            r#"{"id": "x", "supply": "12", "year": null, "pieces": null, "marketplaces": null}"#,
        )
        .unwrap();
        assert_eq!(collection.supply, Some(12));
        assert_eq!(collection.year_or_default(), 2024);
        assert!(collection.pieces.is_empty());
        assert_eq!(collection.chain_badge(), "?");
    }

    #[test]
    fn image_alias_feeds_hero() {
        let collection: Collection =
            serde_json::from_str(r#"{"id": "r", "image": "https://media.raster.art/abc"}"#).unwrap();
        assert_eq!(collection.hero_url().as_deref(), Some("https://media.raster.art/abc"));
    }

    #[test]
    fn ordinals_representative_id_builds_content_url() {
        let collection = Collection {
            id: "bpe".into(),
            chain: "ordinals".into(),
            representative_id: Some("abci0".into()),
            ..Default::default()
        };
        assert_eq!(
            collection.hero_url().as_deref(),
            Some("https://ordinals.com/content/abci0")
        );
    }

    #[test]
    fn labels_fall_back_in_documented_order() {
        let mut collection = Collection {
            id: "c".into(),
            ..Default::default()
        };
        assert_eq!(collection.supply_label(), "?");
        assert_eq!(collection.count_label(), "?");

        collection.supply = Some(30);
        collection.pieces = vec![piece("1"), piece("2")];
        assert_eq!(collection.supply_label(), "30");
        assert_eq!(collection.count_label(), "2");
    }

    #[test]
    fn editions_require_supply_strictly_above_unique_pieces() {
        let mut collection = Collection {
            supply: Some(2),
            pieces: vec![piece("1"), piece("2")],
            ..Default::default()
        };
        assert!(!collection.is_edition_collection());

        collection.supply = Some(3);
        assert!(collection.is_edition_collection());

        collection.is_editions = Some(false);
        assert!(!collection.is_edition_collection());
    }

    #[test]
    fn representative_piece_is_synthesised_once() {
        let mut collection = Collection {
            id: "patience".into(),
            title: "Patience".into(),
            chain: "ordinals".into(),
            onchain: true,
            supply: Some(49),
            hero_image: Some("https://ordinals.com/content/xyz".into()),
            representative_id: Some("xyz".into()),
            ..Default::default()
        };
        assert!(collection.synthesise_representative());
        assert!(!collection.synthesise_representative());
        assert_eq!(collection.pieces.len(), 1);
        assert_eq!(collection.pieces[0].token_id, "xyz");
        assert_eq!(
            collection.pieces[0].animation_url.as_deref(),
            Some("https://ordinals.com/content/xyz")
        );
        assert_eq!(collection.count_label(), "49");
        assert!(collection.is_edition_collection());
        assert_eq!(collection.piece_title(&collection.pieces[0]), "Patience");
    }

    #[test]
    fn nothing_to_synthesise_without_hero() {
        let mut collection = Collection::default();
        assert!(!collection.synthesise_representative());
        assert!(collection.pieces.is_empty());
    }
}
