use eframe::{Frame, egui};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{GALLERY, GalleryTimings};
use crate::data::{Catalog, ChainFilter, TimelineYear};
use crate::domain::{GalleryError, full_image_url};
use crate::engine::{DisplayExit, SessionController, SessionEffect};
use crate::ui::download::DownloadJob;
use crate::ui::lightbox::Lightbox;
use crate::ui::config::UI_TEXT;
use crate::ui::utils::setup_custom_visuals;
use crate::ui::view_renderer::ViewRenderer;
use crate::utils::app_time::{AppInstant, now};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Everything a click or key press can ask for. Collected while painting,
/// dispatched once the frame's UI is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum UiAction {
    OpenCollection(String),
    ShowPiece(usize),
    GoHome,
    ToggleSlideshow,
    OpenHeroCollection,
    EnterDisplayAll,
    EnterDisplayCollection { id: String, index: usize },
    DisplayPrev,
    DisplayNext,
    DisplayShuffle,
    ExitDisplay(DisplayExit),
    OpenLightbox,
    CloseLightbox,
    Download,
    SetFilter(ChainFilter),
    ToggleSidePanel,
}

pub struct GalleryApp {
    pub(super) session: SessionController,
    pub(super) renderer: ViewRenderer,
    pub(super) lightbox: Lightbox,
    pub(super) filter: ChainFilter,
    pub(super) timeline: Vec<TimelineYear>,
    pub(super) catalog_signature: &'static str,
    pub(super) download: Option<DownloadJob>,
    pub(super) status: Option<String>,
    pub(super) last_error: Option<GalleryError>,
    /// Narrow layouts only: whether the timeline is expanded
    pub(super) side_panel_open: bool,
    /// Set once the window is seen fullscreen during the current display session
    pub(super) fullscreen_held: bool,
    pub(super) pending: Vec<UiAction>,
    rng: StdRng,
}

impl GalleryApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        catalog: Catalog,
        catalog_signature: &'static str,
        timings: GalleryTimings,
        kiosk: bool,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let filter = ChainFilter::All;
        let mut app = Self {
            timeline: catalog.timeline(filter),
            session: SessionController::new(Arc::clone(&catalog), timings),
            renderer: ViewRenderer::new(),
            lightbox: Lightbox::default(),
            filter,
            catalog_signature,
            download: None,
            status: None,
            last_error: None,
            side_panel_open: false,
            fullscreen_held: false,
            pending: Vec::new(),
            rng: StdRng::from_entropy(),
        };

        if catalog.eligible().is_empty() {
            app.last_error = Some(GalleryError::CatalogEmpty);
            log::error!("{}", GalleryError::CatalogEmpty);
        }

        let ctx = &cc.egui_ctx;
        let effects = app.session.start(now(), &mut app.rng);
        app.apply_effects(ctx, effects);
        if kiosk {
            app.dispatch(ctx, UiAction::EnterDisplayAll);
        }
        app
    }

    pub(super) fn push_action(&mut self, action: UiAction) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("UI action: {:?}", action);
        }
        self.pending.push(action);
    }

    fn drain_actions(&mut self, ctx: &egui::Context) {
        for action in std::mem::take(&mut self.pending) {
            self.dispatch(ctx, action);
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, action: UiAction) {
        let at = now();
        let result = match action {
            UiAction::OpenCollection(id) => {
                self.lightbox.close();
                self.session.open_detail(&id)
            }
            UiAction::ShowPiece(index) => self.session.show_piece(index),
            UiAction::GoHome => {
                self.lightbox.close();
                Ok(self.session.go_home(at, &mut self.rng))
            }
            UiAction::ToggleSlideshow => Ok(self.session.toggle_slideshow(at)),
            UiAction::OpenHeroCollection => self.session.open_hero_collection(),
            UiAction::EnterDisplayAll => self.session.enter_display_all(at, &mut self.rng),
            UiAction::EnterDisplayCollection { id, index } => {
                self.session.enter_display_collection(&id, index, at)
            }
            UiAction::DisplayPrev => Ok(self.session.display_prev(at)),
            UiAction::DisplayNext => Ok(self.session.display_next(at)),
            UiAction::DisplayShuffle => Ok(self.session.display_shuffle(at, &mut self.rng)),
            UiAction::ExitDisplay(reason) => Ok(self.session.exit_display(reason, at)),
            UiAction::OpenLightbox => {
                self.open_lightbox();
                Ok(Vec::new())
            }
            UiAction::CloseLightbox => {
                self.lightbox.close();
                Ok(Vec::new())
            }
            UiAction::Download => {
                self.start_download();
                Ok(Vec::new())
            }
            UiAction::SetFilter(filter) => {
                self.filter = filter;
                self.timeline = self.session.catalog().timeline(filter);
                Ok(Vec::new())
            }
            UiAction::ToggleSidePanel => {
                self.side_panel_open = !self.side_panel_open;
                Ok(Vec::new())
            }
        };

        match result {
            Ok(effects) => self.apply_effects(ctx, effects),
            Err(e) => {
                log::warn!("{}", e);
                self.last_error = Some(e);
            }
        }
    }

    pub(super) fn apply_effects(&mut self, ctx: &egui::Context, effects: Vec<SessionEffect>) {
        let mut rendered = false;
        for effect in effects {
            match effect {
                SessionEffect::RequestFullscreen => {
                    self.fullscreen_held = false;
                    // A refusal leaves the window as it is; display mode carries on windowed
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
                }
                SessionEffect::ReleaseFullscreen => {
                    let is_fullscreen = ctx.input(|i| i.viewport().fullscreen).unwrap_or(false);
                    if is_fullscreen {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
                    }
                    self.fullscreen_held = false;
                }
                render => {
                    rendered |= self.renderer.apply(&render);
                }
            }
        }
        if rendered {
            self.last_error = None;
            self.preload_upcoming(ctx);
        }
    }

    /// Warm the image cache. Results are dropped; slots are never fed from here.
    fn preload_upcoming(&self, ctx: &egui::Context) {
        for selection in self.session.upcoming(GALLERY.rotation.preload_ahead) {
            if let Some(url) = selection.preview_url() {
                let _ = ctx.try_load_image(&url, egui::SizeHint::default());
            }
        }
    }

    fn open_lightbox(&mut self) {
        let Some(selection) = self.session.detail() else {
            return;
        };
        let collection = &selection.collection;
        let url = full_image_url(collection, selection.piece());
        let title = collection.piece_title(selection.piece());
        self.lightbox.open(url, title);
    }

    fn start_download(&mut self) {
        if self.download.is_some() {
            return;
        }
        let Some(selection) = self.session.detail() else {
            return;
        };
        match full_image_url(&selection.collection, selection.piece()) {
            Some(url) => {
                self.status = Some(UI_TEXT.download_busy.to_string());
                self.download = Some(DownloadJob::start(url, selection.collection_id()));
            }
            None => log::warn!("Nothing to download for {}", selection.collection_id()),
        }
    }

    fn poll_download(&mut self, ctx: &egui::Context) {
        let outcome = self
            .download
            .as_ref()
            .and_then(|job| job.poll().map(|result| (job.url.clone(), result.clone())));

        if let Some((url, result)) = outcome {
            self.download = None;
            match result {
                Ok(path) => {
                    self.status = Some(format!("{}{}", UI_TEXT.download_saved_prefix, path.display()));
                }
                Err(e) => {
                    log::warn!("Download failed ({}), opening {} in a new tab", e, url);
                    ctx.open_url(egui::OpenUrl::new_tab(url));
                    self.status = Some(UI_TEXT.download_fallback.to_string());
                }
            }
        } else if self.download.is_some() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }

    /// Leaving fullscreen by other means ends display mode.
    fn watch_fullscreen(&mut self, ctx: &egui::Context) {
        if !self.session.state().is_display() {
            return;
        }
        match ctx.input(|i| i.viewport().fullscreen) {
            Some(true) => self.fullscreen_held = true,
            Some(false) if self.fullscreen_held => {
                self.push_action(UiAction::ExitDisplay(DisplayExit::FullscreenLost));
            }
            _ => {}
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, at: AppInstant) {
        if let Some(left) = self.session.next_tick_in(at) {
            // Display mode shows a per-second countdown
            let wake = if self.session.state().is_display() {
                left.min(Duration::from_secs(1))
            } else {
                left
            };
            ctx.request_repaint_after(wake);
        }
    }
}

impl eframe::App for GalleryApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop any in-flight download so its thread is not left reporting to nothing
        self.download = None;
        log::info!("Gallery closed.");
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let at = now();

        self.watch_fullscreen(ctx);
        self.handle_global_shortcuts(ctx);
        self.drain_actions(ctx);

        let effects = self.session.tick(at, &mut self.rng);
        self.apply_effects(ctx, effects);
        self.poll_download(ctx);

        if self.session.state().is_display() {
            self.render_display_mode(ctx, at);
        } else {
            self.render_side_panel(ctx);
            self.render_central_panel(ctx);
        }
        if self.lightbox.is_open() {
            self.render_lightbox(ctx);
        }

        // Clicks gathered while painting
        self.drain_actions(ctx);
        self.schedule_repaint(ctx, now());
    }
}
