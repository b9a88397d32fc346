#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

#[cfg(not(target_arch = "wasm32"))]
pub mod fetch;

// Re-export commonly used types
pub use data::{Catalog, CatalogFile, fetch_catalog_data};
pub use domain::{Collection, MediaPlan, Piece, resolve, to_optimized_url};
pub use engine::{SelectionEngine, SessionController};
pub use ui::GalleryApp;
pub use utils::app_time;

use std::path::PathBuf;

// CLI argument parsing
use clap::Parser;

use crate::config::GalleryTimings;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog JSON to show instead of the built-in one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Start straight into fullscreen display mode
    #[arg(long, default_value_t = false)]
    pub kiosk: bool,

    /// Seconds between home slideshow changes
    #[arg(long)]
    pub slideshow_secs: Option<u64>,

    /// Seconds between display mode changes
    #[arg(long)]
    pub display_secs: Option<u64>,
}

impl Cli {
    pub fn timings(&self) -> GalleryTimings {
        GalleryTimings::with_overrides(self.slideshow_secs, self.display_secs)
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    catalog: Catalog,
    catalog_signature: &'static str,
    args: &Cli,
) -> Box<dyn eframe::App> {
    // Remote URLs, data URIs and image decoding for egui::Image
    egui_extras::install_image_loaders(&cc.egui_ctx);

    let app = ui::GalleryApp::new(cc, catalog, catalog_signature, args.timings(), args.kiosk);
    Box::new(app)
}
