//! Third-party indexer configuration for the offline catalog fetcher.

/// Endpoints of the chain indexers
pub struct IndexerEndpoints {
    /// Alchemy NFT API v3, followed by the API key
    pub alchemy_base_url: &'static str,
    pub tzkt_tokens_url: &'static str,
    pub magic_eden_tokens_url: &'static str,
}

/// Rewrites applied to content-addressed URLs so browsers can load them
pub struct GatewayConfig {
    pub ipfs_scheme: &'static str,
    pub ipfs_gateway: &'static str,
    pub arweave_scheme: &'static str,
    pub arweave_gateway: &'static str,
}

/// Marketplace link templates, the contract or slug is appended
pub struct MarketplaceTemplates {
    pub opensea: &'static str,
    pub objkt: &'static str,
    pub magic_eden: &'static str,
}

/// Default values for the HTTP client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u8,
    pub backoff_base_ms: u64,
    /// Pause between two collections (rate limiting)
    pub collection_delay_ms: u64,
}

/// The Master Sources Configuration
pub struct SourcesConfig {
    pub endpoints: IndexerEndpoints,
    pub gateways: GatewayConfig,
    pub marketplaces: MarketplaceTemplates,
    pub client: ClientDefaults,
    /// Page size requested from every indexer
    pub page_limit: u32,
    /// Upper bound on pages followed per collection
    pub max_pages: u32,
}

pub const SOURCES: SourcesConfig = SourcesConfig {
    endpoints: IndexerEndpoints {
        alchemy_base_url: "https://eth-mainnet.g.alchemy.com/nft/v3/",
        tzkt_tokens_url: "https://api.tzkt.io/v1/tokens",
        magic_eden_tokens_url: "https://api-mainnet.magiceden.dev/v2/ord/btc/tokens",
    },
    gateways: GatewayConfig {
        ipfs_scheme: "ipfs://",
        ipfs_gateway: "https://ipfs.io/ipfs/",
        arweave_scheme: "ar://",
        arweave_gateway: "https://arweave.net/",
    },
    marketplaces: MarketplaceTemplates {
        opensea: "https://opensea.io/assets/ethereum/",
        objkt: "https://objkt.com/collection/",
        magic_eden: "https://magiceden.io/ordinals/marketplace/",
    },
    client: ClientDefaults {
        timeout_ms: 15_000,
        retries: 4,
        backoff_base_ms: 300,
        collection_delay_ms: 500,
    },
    page_limit: 100,
    max_pages: 20,
};
