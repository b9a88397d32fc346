use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Chains the gallery knows how to badge and filter.
///
/// Collections store the raw chain string; anything that does not parse into
/// one of these still renders, badged with its uppercased raw name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Chain {
    Ordinals,
    Ethereum,
    Tezos,
    Solana,
}

impl Chain {
    /// Short ticker shown on badges.
    pub fn badge(&self) -> &'static str {
        match self {
            Chain::Ordinals => "BTC",
            Chain::Ethereum => "ETH",
            Chain::Tezos => "TEZ",
            Chain::Solana => "SOL",
        }
    }

    pub fn parse(raw: &str) -> Option<Chain> {
        Chain::from_str(raw.trim()).ok()
    }
}

/// Badge text for a raw chain string.
pub fn chain_badge(raw: &str) -> String {
    match Chain::parse(raw) {
        Some(chain) => chain.badge().to_string(),
        None => chain_label(raw),
    }
}

/// Raw chain name, uppercased ("?" when absent).
pub fn chain_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "?".to_string()
    } else {
        trimmed.to_uppercase()
    }
}

/// Accept `null` wherever a defaultable value is expected.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn known_chains_map_to_tickers() {
        assert_eq!(chain_badge("ordinals"), "BTC");
        assert_eq!(chain_badge("Ethereum"), "ETH");
        assert_eq!(chain_badge("tezos"), "TEZ");
        assert_eq!(chain_badge("solana"), "SOL");
    }

    #[test]
    fn unknown_chain_falls_back_to_uppercased_raw() {
        assert_eq!(chain_badge("polygon"), "POLYGON");
        assert_eq!(chain_badge(""), "?");
        assert_eq!(Chain::parse("polygon"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for chain in Chain::iter() {
            assert_eq!(Chain::parse(&chain.to_string()), Some(chain));
        }
    }
}
