pub mod chain;
pub mod collection;
pub mod error;
pub mod media;
pub mod piece;

// Re-export key types
pub use chain::Chain;
pub use collection::Collection;
pub use error::GalleryError;
pub use media::{MediaKind, MediaPlan, full_image_url, resolve, resolve_thumbnail, to_optimized_url};
pub use piece::{Attribute, Piece};
