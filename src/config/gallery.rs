//! Slideshow, display-mode and detail-view configuration

use std::time::Duration;

/// Timing of the two rotating viewers
pub struct RotationConfig {
    /// Seconds between automatic hero changes on the home page
    pub slideshow_secs: u64,
    /// Seconds between automatic changes in fullscreen display mode
    pub display_secs: u64,
    /// How many upcoming pieces to warm in the image cache
    pub preload_ahead: usize,
}

/// Fallbacks used when a catalog entry is missing a field
pub struct CatalogDefaults {
    // Collections without a year are filed under this one in the timeline
    pub year: i32,
    // Shown wherever a count cannot be derived
    pub unknown_count_label: &'static str,
}

/// Detail-view download behaviour
pub struct DownloadConfig {
    /// File name prefix, followed by the collection id
    pub file_prefix: &'static str,
    /// Extension used when the URL does not end in a recognised one
    pub default_extension: &'static str,
    pub timeout_secs: u64,
}

/// The Master Gallery Configuration
pub struct GalleryConfig {
    pub rotation: RotationConfig,
    pub defaults: CatalogDefaults,
    pub download: DownloadConfig,
    /// Below this viewport width the timeline collapses behind the menu toggle
    pub narrow_layout_px: f32,
}

pub const GALLERY: GalleryConfig = GalleryConfig {
    rotation: RotationConfig {
        slideshow_secs: 10,
        display_secs: 15,
        preload_ahead: 3,
    },
    defaults: CatalogDefaults {
        year: 2024,
        unknown_count_label: "?",
    },
    download: DownloadConfig {
        file_prefix: "stranger-solemn",
        default_extension: "png",
        timeout_secs: 30,
    },
    narrow_layout_px: 768.0,
};

/// Effective rotation periods for one run of the app.
/// (This is the runtime struct, built from `GALLERY` plus CLI overrides)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryTimings {
    pub slideshow: Duration,
    pub display: Duration,
}

impl Default for GalleryTimings {
    fn default() -> Self {
        Self {
            slideshow: Duration::from_secs(GALLERY.rotation.slideshow_secs),
            display: Duration::from_secs(GALLERY.rotation.display_secs),
        }
    }
}

impl GalleryTimings {
    /// Zero is treated as "not given" so a repeating timer can never spin.
    pub fn with_overrides(slideshow_secs: Option<u64>, display_secs: Option<u64>) -> Self {
        let base = Self::default();
        Self {
            slideshow: slideshow_secs
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(base.slideshow),
            display: display_secs
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(base.display),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults_but_ignore_zero() {
        let timings = GalleryTimings::with_overrides(Some(4), Some(0));
        assert_eq!(timings.slideshow, Duration::from_secs(4));
        assert_eq!(
            timings.display,
            Duration::from_secs(GALLERY.rotation.display_secs)
        );
    }
}
