//! File locations used by the viewer and the fetch tool

pub struct PathsConfig {
    /// Fetch tool output (loadable with `--catalog`)
    pub generated_catalog: &'static str,
    /// Collections the fetch tool should query
    pub fetch_sources: &'static str,
    /// Where native downloads are written
    pub download_dir: &'static str,
}

pub const PATHS: PathsConfig = PathsConfig {
    generated_catalog: "assets/catalog-generated.json",
    fetch_sources: "assets/fetch_sources.json",
    download_dir: "downloads",
};

/// Catalog bundled into every build
pub const EMBEDDED_CATALOG_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/catalog.json"));

/// Version stamped into catalog files written by the fetch tool
pub const CATALOG_FILE_VERSION: f64 = 1.0;
