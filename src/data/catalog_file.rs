use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::CATALOG_FILE_VERSION;
use crate::domain::Collection;
use crate::utils::TimeUtils;

/// Catalog file as written by the fetch tool.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    #[serde(default)]
    pub version: f64,
    #[serde(default)]
    pub generated_at_ms: i64,
    pub collections: Vec<Collection>,
}

/// Either the envelope above or a bare collection array (hand-maintained catalogs).
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Envelope(CatalogFile),
    Bare(Vec<Collection>),
}

impl CatalogFile {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            version: CATALOG_FILE_VERSION,
            generated_at_ms: TimeUtils::now_timestamp_ms(),
            collections,
        }
    }

    pub fn parse(text: &str) -> Result<Vec<Collection>> {
        let document: CatalogDocument =
            serde_json::from_str(text).context("Catalog is neither a collection array nor a catalog file")?;
        Ok(match document {
            CatalogDocument::Envelope(file) => file.collections,
            CatalogDocument::Bare(collections) => collections,
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Vec<Collection>> {
        let file = File::open(path).context(format!("Failed to open catalog file: {:?}", path))?;
        let reader = BufReader::new(file);
        let document: CatalogDocument = serde_json::from_reader(reader)
            .context(format!("Failed to parse catalog file: {:?}", path))?;
        Ok(match document {
            CatalogDocument::Envelope(file) => file.collections,
            CatalogDocument::Bare(collections) => collections,
        })
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .context(format!("Failed to serialize catalog to: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EMBEDDED_CATALOG_JSON;

    #[test]
    fn bare_array_and_envelope_both_parse() {
        let bare = CatalogFile::parse(r#"[{"id": "a"}, {"id": "b"}]"#).unwrap();
        assert_eq!(bare.len(), 2);

        let envelope =
            CatalogFile::parse(r#"{"version": 1.0, "generatedAtMs": 5, "collections": [{"id": "a"}]}"#)
                .unwrap();
        assert_eq!(envelope[0].id, "a");
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(CatalogFile::parse(r#"{"nope": 1}"#).is_err());
    }

    #[test]
    fn embedded_catalog_parses() {
        let collections = CatalogFile::parse(EMBEDDED_CATALOG_JSON).unwrap();
        assert!(collections.len() > 50);
        assert!(collections.iter().all(|c| !c.id.is_empty()));
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("solemn-catalog-{}", std::process::id()));
        let path = dir.join("catalog.json");
        let file = CatalogFile::new(vec![Collection {
            id: "saved".into(),
            title: "Saved".into(),
            ..Default::default()
        }]);
        file.save_to_path(&path).unwrap();
        let loaded = CatalogFile::load_from_path(&path).unwrap();
        assert_eq!(loaded[0].title, "Saved");
        let _ = std::fs::remove_dir_all(dir);
    }
}
