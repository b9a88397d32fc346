//! Configuration module for the gallery.

pub mod gallery;
pub mod media;
pub mod paths;
pub mod sources;

mod debug; // Private: use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use gallery::{GALLERY, GalleryTimings};
pub use media::MEDIA;
pub use paths::{CATALOG_FILE_VERSION, EMBEDDED_CATALOG_JSON, PATHS};
pub use sources::SOURCES;
