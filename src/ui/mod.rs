// User interface components
pub mod app;
pub mod config;
pub mod download;
pub mod lightbox;
pub mod media_view;
pub mod styles;
pub mod ui_panels;
pub mod ui_render;
pub mod ui_text;
pub mod utils;
pub mod view_renderer;

// Re-export main app
pub use app::GalleryApp;
pub use config::UI_CONFIG;
pub use view_renderer::{MediaSlots, Region, ViewRenderer};
