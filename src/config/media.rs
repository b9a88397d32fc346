//! Media classification and URL optimisation knobs.

pub struct VideoDetection {
    /// Animation URLs ending in one of these are played as video
    pub extensions: &'static [&'static str],
    /// ...as are animation URLs containing this marker anywhere
    pub marker: &'static str,
}

pub struct CdnOptimisation {
    /// Only URLs on this host are rewritten
    pub host_pattern: &'static str,
    pub upload_segment: &'static str,
    /// Transformation inserted after the upload segment (auto format + quality)
    pub transform: &'static str,
}

pub struct MediaConfig {
    pub video: VideoDetection,
    pub cdn: CdnOptimisation,
    /// Data URIs with this prefix carry inline HTML and need an iframe
    pub html_data_prefix: &'static str,
    /// Content endpoint for ordinals inscriptions
    pub ordinals_content_base: &'static str,
}

pub const MEDIA: MediaConfig = MediaConfig {
    video: VideoDetection {
        extensions: &[".mp4", ".webm", ".mov"],
        marker: "video",
    },
    cdn: CdnOptimisation {
        host_pattern: "res.cloudinary.com",
        upload_segment: "/upload/",
        transform: "f_auto,q_auto",
    },
    html_data_prefix: "data:text/html",
    ordinals_content_base: "https://ordinals.com/content/",
};
