use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single trait from token metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, alias = "traitType")]
    pub trait_type: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// One artwork within a collection.
///
/// Every field is optional in the catalog; the resolver and the views treat
/// empty strings the same as missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    #[serde(default, deserialize_with = "string_or_number")]
    pub token_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// HTML-serving endpoint, data URI or animation file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    /// Forces a static image even for on-chain collections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_image: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_attributes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inscription_number: Option<i64>,
}

impl Piece {
    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(&self.thumbnail)
    }

    pub fn animation_url(&self) -> Option<&str> {
        non_empty(&self.animation_url)
    }

    pub fn video(&self) -> Option<&str> {
        non_empty(&self.video)
    }

    /// Title shown next to the collection name: the piece title, else `#tokenId`.
    pub fn indicator(&self) -> String {
        match non_empty(&self.title) {
            Some(title) => title.to_string(),
            None if !self.token_id.is_empty() => format!("#{}", self.token_id),
            None => String::new(),
        }
    }

    /// Static image preferring the full file over the thumbnail.
    pub fn full_image(&self) -> Option<&str> {
        self.image().or(self.thumbnail())
    }

    /// Static image preferring the thumbnail.
    pub fn static_image(&self) -> Option<&str> {
        self.thumbnail().or(self.image())
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Token ids arrive as strings from most indexers but as numbers from some.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Like `string_or_number`, but null and empty become `None`.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = string_or_number(deserializer)?;
    Ok((!value.is_empty()).then_some(value))
}

/// Metadata attributes are free-form; keep the entries that parse and drop the rest.
pub(crate) fn lenient_attributes<'de, D>(deserializer: D) -> Result<Vec<Attribute>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_token_ids_become_strings() {
        let piece: Piece = serde_json::from_str(r#"{"tokenId": 42}"#).unwrap();
        assert_eq!(piece.token_id, "42");
        assert_eq!(piece.indicator(), "#42");
    }

    #[test]
    fn null_and_missing_fields_default() {
        let piece: Piece =
            serde_json::from_str(r#"{"title": null, "attributes": null, "image": ""}"#).unwrap();
        assert!(piece.attributes.is_empty());
        assert_eq!(piece.image(), None);
        assert_eq!(piece.indicator(), "");
    }

    #[test]
    fn malformed_attributes_are_dropped_not_fatal() {
        let piece: Piece = serde_json::from_str(
            r#"{"attributes": [{"trait_type": "Mood", "value": "calm"}, 7]}"#,
        )
        .unwrap();
        assert_eq!(piece.attributes.len(), 1);

        let piece: Piece = serde_json::from_str(r#"{"attributes": {"oops": true}}"#).unwrap();
        assert!(piece.attributes.is_empty());
    }

    #[test]
    fn static_and_full_image_preferences_differ() {
        let piece = Piece {
            image: Some("full.png".into()),
            thumbnail: Some("thumb.png".into()),
            ..Default::default()
        };
        assert_eq!(piece.static_image(), Some("thumb.png"));
        assert_eq!(piece.full_image(), Some("full.png"));
    }
}
