use anyhow::{Result, anyhow};
use async_trait::async_trait;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::config::EMBEDDED_CATALOG_JSON;
use crate::data::catalog::Catalog;
use crate::data::catalog_file::CatalogFile;
use crate::domain::{Collection, GalleryError};

#[async_trait]
pub trait CatalogSource {
    // Either produce the raw collections OR return an anyhow::error
    async fn load_collections(&self) -> Result<Vec<Collection>>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each source in order; the first one yielding a non-empty catalog wins.
pub async fn load_catalog(sources: &[Box<dyn CatalogSource>]) -> Result<(Catalog, &'static str)> {
    for source in sources {
        match source.load_collections().await {
            Ok(collections) => {
                let catalog = Catalog::new(collections);
                if catalog.eligible().is_empty() {
                    log::warn!("{}: {}", source.signature(), GalleryError::CatalogEmpty);
                    continue;
                }
                return Ok((catalog, source.signature()));
            }
            Err(e) => {
                log::warn!("Catalog source '{}' failed: {:#}", source.signature(), e);
                // Continue to the next source
            }
        }
    }
    Err(anyhow!("All catalog sources failed to produce collections"))
}

/// The catalog compiled into the binary
pub struct EmbeddedCatalog;

#[async_trait]
impl CatalogSource for EmbeddedCatalog {
    async fn load_collections(&self) -> Result<Vec<Collection>> {
        CatalogFile::parse(EMBEDDED_CATALOG_JSON)
    }

    fn signature(&self) -> &'static str {
        "Embedded Catalog"
    }
}

/// A catalog JSON file on disk (e.g. the fetch tool's output)
#[cfg(not(target_arch = "wasm32"))]
pub struct FileCatalog {
    pub path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl CatalogSource for FileCatalog {
    async fn load_collections(&self) -> Result<Vec<Collection>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog {:?}", self.path))?;
        CatalogFile::parse(&text)
    }

    fn signature(&self) -> &'static str {
        "Catalog File"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl CatalogSource for Failing {
        async fn load_collections(&self) -> Result<Vec<Collection>> {
            Err(anyhow!("offline"))
        }

        fn signature(&self) -> &'static str {
            "Failing"
        }
    }

    struct Empty;

    #[async_trait]
    impl CatalogSource for Empty {
        async fn load_collections(&self) -> Result<Vec<Collection>> {
            Ok(vec![Collection::default()])
        }

        fn signature(&self) -> &'static str {
            "Empty"
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn falls_through_failing_and_empty_sources() {
        let sources: Vec<Box<dyn CatalogSource>> =
            vec![Box::new(Failing), Box::new(Empty), Box::new(EmbeddedCatalog)];
        let (catalog, signature) = load_catalog(&sources).await.unwrap();
        assert_eq!(signature, "Embedded Catalog");
        assert!(!catalog.eligible().is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn all_sources_failing_is_an_error() {
        let sources: Vec<Box<dyn CatalogSource>> = vec![Box::new(Failing), Box::new(Empty)];
        assert!(load_catalog(&sources).await.is_err());
    }
}
