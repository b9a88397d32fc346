use std::fmt;

/// Errors surfaced by catalog lookups and session operations.
///
/// None of these end the session; callers log them and keep the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// No collection in the catalog has anything to show
    CatalogEmpty,
    UnknownCollection(String),
    PieceOutOfRange { collection: String, index: usize },
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::CatalogEmpty => write!(f, "Catalog has no displayable collections"),
            GalleryError::UnknownCollection(id) => write!(f, "Unknown collection: {}", id),
            GalleryError::PieceOutOfRange { collection, index } => {
                write!(f, "Collection {} has no piece at index {}", collection, index)
            }
        }
    }
}

impl std::error::Error for GalleryError {}
