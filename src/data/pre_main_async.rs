// Async code to run in main before egui starts up

use crate::Cli;
use crate::data::catalog::Catalog;
use crate::data::catalog_source::{CatalogSource, EmbeddedCatalog, load_catalog};

#[cfg(not(target_arch = "wasm32"))]
use crate::data::catalog_source::FileCatalog;

/// Load the catalog before the GUI starts (so can't rely on gui app state).
///
/// Never fails: with every source exhausted the app starts on an empty
/// catalog and shows a notice instead of media.
pub async fn fetch_catalog_data(args: &Cli) -> (Catalog, &'static str) {
    #[cfg(not(target_arch = "wasm32"))]
    let sources: Vec<Box<dyn CatalogSource>> = match &args.catalog {
        Some(path) => vec![
            Box::new(FileCatalog { path: path.clone() }),
            Box::new(EmbeddedCatalog),
        ],
        None => vec![Box::new(EmbeddedCatalog)],
    };

    #[cfg(target_arch = "wasm32")]
    let sources: Vec<Box<dyn CatalogSource>> = {
        let _ = args;
        vec![Box::new(EmbeddedCatalog)]
    };

    match load_catalog(&sources).await {
        Ok((catalog, signature)) => {
            log::info!(
                "Loaded {} collections ({} displayable) using: {}.",
                catalog.len(),
                catalog.eligible().len(),
                signature
            );
            (catalog, signature)
        }
        Err(e) => {
            log::error!("⚠️  {:#}", e);
            (Catalog::default(), "none")
        }
    }
}
