//! Media resolution: decide how a piece is rendered.
//!
//! Every view (hero, detail, grid, display mode) asks this module for a
//! [`MediaPlan`] instead of inspecting piece fields itself. The decision order
//! is fixed:
//!
//! 1. explicit video, or an animation URL that looks like a video file;
//! 2. on-chain content: ordinals always frame their animation or still URL,
//!    other chains only an animation URL that differs from the still image
//!    or carries inline HTML;
//! 3. a static image, preferring the thumbnail, then the full image, then the
//!    collection hero.
//!
//! Nothing usable at all yields [`MediaPlan::Unavailable`].

use strum_macros::{Display, EnumIter};

use super::collection::Collection;
use super::piece::Piece;
use crate::config::MEDIA;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Video,
    Iframe,
    Image,
    Unavailable,
}

/// How to render one piece: which slot, fed by which URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaPlan {
    Video(String),
    /// Sandboxed, script-enabled HTML
    Iframe(String),
    Image(String),
    Unavailable,
}

impl MediaPlan {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaPlan::Video(_) => MediaKind::Video,
            MediaPlan::Iframe(_) => MediaKind::Iframe,
            MediaPlan::Image(_) => MediaKind::Image,
            MediaPlan::Unavailable => MediaKind::Unavailable,
        }
    }

    pub fn source_url(&self) -> Option<&str> {
        match self {
            MediaPlan::Video(url) | MediaPlan::Iframe(url) | MediaPlan::Image(url) => Some(url),
            MediaPlan::Unavailable => None,
        }
    }

    fn image(url: &str) -> Self {
        MediaPlan::Image(to_optimized_url(url))
    }
}

/// Resolve the rendering strategy for `piece` of `collection`.
pub fn resolve(collection: &Collection, piece: &Piece) -> MediaPlan {
    if let Some(video) = piece.video() {
        return MediaPlan::Video(video.to_string());
    }

    let animation = piece.animation_url();
    if let Some(url) = animation.filter(|url| looks_like_video(url)) {
        return MediaPlan::Video(url.to_string());
    }

    if collection.onchain && piece.is_image != Some(true) {
        if collection.is_ordinals() {
            // Inscription content endpoints serve HTML, the still URL included
            if let Some(url) = animation.or(piece.image()) {
                return MediaPlan::Iframe(url.to_string());
            }
        } else if let Some(url) = animation {
            if Some(url) != piece.image() || url.starts_with(MEDIA.html_data_prefix) {
                return MediaPlan::Iframe(url.to_string());
            }
        }
    }

    match piece.static_image() {
        Some(url) => MediaPlan::image(url),
        None => collection
            .hero_url()
            .map(|url| MediaPlan::image(&url))
            .unwrap_or(MediaPlan::Unavailable),
    }
}

/// Plan for a thumbnail grid cell: a static image wins whenever one exists,
/// so grids of on-chain pieces do not spin up one iframe per cell.
pub fn resolve_thumbnail(collection: &Collection, piece: &Piece) -> MediaPlan {
    match piece.static_image() {
        Some(url) => MediaPlan::image(url),
        None => resolve(collection, piece),
    }
}

/// Full-resolution still for the lightbox and downloads (never rewritten).
pub fn full_image_url(collection: &Collection, piece: &Piece) -> Option<String> {
    piece
        .full_image()
        .map(str::to_string)
        .or_else(|| collection.hero_url())
}

fn looks_like_video(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or(&lower);
    MEDIA.video.extensions.iter().any(|ext| path.ends_with(ext)) || lower.contains(MEDIA.video.marker)
}

/// Ask the image CDN for an auto-negotiated compressed format.
///
/// Identity for every URL that is not on the CDN host.
pub fn to_optimized_url(url: &str) -> String {
    let cdn = &MEDIA.cdn;
    if !url.contains(cdn.host_pattern) {
        return url.to_string();
    }
    let optimised_segment = format!("{}{}/", cdn.upload_segment, cdn.transform);
    if url.contains(&optimised_segment) {
        return url.to_string();
    }
    url.replacen(cdn.upload_segment, &optimised_segment, 1)
}
