// Catalog storage and loading
pub mod catalog;
pub mod catalog_file;
pub mod catalog_source;
pub mod pre_main_async;

// Re-export commonly used types
pub use catalog::{Catalog, ChainFilter, TimelineEntry, TimelineYear};
pub use catalog_file::CatalogFile;
pub use catalog_source::{CatalogSource, EmbeddedCatalog, load_catalog};
pub use pre_main_async::fetch_catalog_data;
