use crate::config::SOURCES;

/// Lowercase, collapse every non-alphanumeric run into `-`, trim dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Rewrite `ipfs://` and `ar://` URLs to their HTTP gateways.
pub fn resolve_gateway_url(url: &str) -> String {
    let gateways = &SOURCES.gateways;
    if let Some(rest) = url.strip_prefix(gateways.ipfs_scheme) {
        format!("{}{}", gateways.ipfs_gateway, rest)
    } else if let Some(rest) = url.strip_prefix(gateways.arweave_scheme) {
        format!("{}{}", gateways.arweave_gateway, rest)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_matches_catalog_ids() {
        assert_eq!(slugify("StrangersNFT"), "strangersnft");
        assert_eq!(slugify("Block Party Editions"), "block-party-editions");
        assert_eq!(slugify("  7 Year Glitch! "), "7-year-glitch");
        assert_eq!(slugify("Sartoshi's Island"), "sartoshi-s-island");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn gateways_are_rewritten() {
        assert_eq!(resolve_gateway_url("ipfs://Qm123/1.png"), "https://ipfs.io/ipfs/Qm123/1.png");
        assert_eq!(resolve_gateway_url("ar://tx"), "https://arweave.net/tx");
        assert_eq!(resolve_gateway_url("https://x.example/a"), "https://x.example/a");
    }
}
