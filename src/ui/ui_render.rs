use eframe::egui::{
    self, Align, CentralPanel, Context, Frame, Key, Layout, Margin, Modal, RichText, ScrollArea,
    SidePanel, TopBottomPanel, Ui, Vec2,
};

use crate::config::GALLERY;
use crate::domain::{Collection, Piece, to_optimized_url};
use crate::engine::{DisplayExit, SessionState};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::media_view::show_region_media;
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{
    DisplayControlsPanel, DisplayEvent, GridEvent, Panel, PiecesGridPanel, TimelineEvent,
    TimelinePanel,
};
use crate::ui::utils::{section_heading, spaced_separator};
use crate::ui::view_renderer::Region;
use crate::utils::app_time::AppInstant;

use super::app::{GalleryApp, UiAction};

impl GalleryApp {
    fn is_narrow(ctx: &Context) -> bool {
        ctx.available_rect().width() < GALLERY.narrow_layout_px
    }

    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let narrow = Self::is_narrow(ctx);
        if narrow {
            TopBottomPanel::top("menu_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button(UI_TEXT.menu_toggle).clicked() {
                        self.push_action(UiAction::ToggleSidePanel);
                    }
                    if ui.button(UI_TEXT.home_button).clicked() {
                        self.push_action(UiAction::GoHome);
                    }
                });
            });
            if !self.side_panel_open {
                return;
            }
        }

        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        SidePanel::left("timeline_panel")
            .default_width(UI_CONFIG.layout.side_panel_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                if !narrow && ui.button(UI_TEXT.home_button).clicked() {
                    self.push_action(UiAction::GoHome);
                }
                let selected = self.session.detail_collection().map(|c| c.id.clone());
                let events =
                    TimelinePanel::new(&self.timeline, self.filter, selected.as_deref()).render(ui);

                for event in events {
                    match event {
                        TimelineEvent::Filter(filter) => self.push_action(UiAction::SetFilter(filter)),
                        TimelineEvent::Open(id) => {
                            self.push_action(UiAction::OpenCollection(id));
                            if narrow {
                                self.side_panel_open = false;
                            }
                        }
                    }
                }
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(12));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                if self.session.detail_collection().is_some() {
                    self.render_detail(ui);
                } else {
                    self.render_home(ui);
                }
            });
    }

    fn render_home(&mut self, ui: &mut Ui) {
        section_heading(ui, UI_TEXT.hero_heading);
        if let Some(e) = &self.last_error {
            ui.label_warning(e.to_string());
        }

        let max_size = ui.available_size() - Vec2::new(0.0, 110.0);
        let view = self.renderer.region(Region::Hero);
        ui.vertical_centered(|ui| {
            show_region_media(ui, view, max_size.max(Vec2::splat(64.0)));
        });

        let mut open_hero = false;
        if let (Some(text), Some(selection)) = (&view.text, &view.selection) {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                open_hero |= ui
                    .link(RichText::new(&text.title).size(20.0).color(UI_CONFIG.colors.heading))
                    .clicked();
                ui.horizontal(|ui| {
                    open_hero |= ui.link(&text.collection_title).clicked();
                    open_hero |= ui.chain_badge(&selection.collection).clicked();
                });
            });
        }

        ui.add_space(8.0);
        let mut toggle = false;
        let mut display = false;
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                let label = match self.session.state() {
                    SessionState::SlideshowRunning => UI_TEXT.pause,
                    _ => UI_TEXT.play,
                };
                toggle = ui.button(label).clicked();
                display = ui.button(UI_TEXT.enter_display).clicked();
            });
            ui.label_subdued(format!("{}{}", UI_TEXT.catalog_source_prefix, self.catalog_signature));
        });

        if open_hero {
            self.push_action(UiAction::OpenHeroCollection);
        }
        if toggle {
            self.push_action(UiAction::ToggleSlideshow);
        }
        if display {
            self.push_action(UiAction::EnterDisplayAll);
        }
    }

    fn render_detail(&mut self, ui: &mut Ui) {
        let Some(collection) = self.session.detail_collection().cloned() else {
            return;
        };
        let selection = self.session.detail().cloned();
        let piece = selection.as_ref().map(|s| s.piece());
        let mut actions = Vec::new();

        ScrollArea::vertical().id_salt("detail").show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label_header(&collection.title);
                ui.chain_badge(&collection);
            });
            if let Some(piece) = piece.filter(|_| !collection.representative_only) {
                ui.label_subheader(piece.indicator());
            }
            if let Some(e) = &self.last_error {
                ui.label_warning(e.to_string());
            }
            ui.add_space(8.0);

            let max_size = Vec2::new(ui.available_width(), ui.available_height().max(420.0) * 0.7);
            let media = show_region_media(ui, self.renderer.region(Region::Detail), max_size);
            if media.clicked() {
                actions.push(UiAction::OpenLightbox);
            }

            spaced_separator(ui);
            self.render_metadata(ui, &collection, piece);

            let has_pieces = selection.is_some();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(has_pieces, egui::Button::new(UI_TEXT.display_collection))
                    .clicked()
                {
                    actions.push(UiAction::EnterDisplayCollection {
                        id: collection.id.clone(),
                        index: 0,
                    });
                }
                let idle = has_pieces && self.download.is_none();
                if ui.add_enabled(idle, egui::Button::new(UI_TEXT.download)).clicked() {
                    actions.push(UiAction::Download);
                }
                if let Some(status) = &self.status {
                    ui.label_subdued(status);
                }
            });

            let Some(selection) = &selection else {
                return;
            };
            spaced_separator(ui);
            let width = ui.available_width();
            for event in PiecesGridPanel::new(&collection, selection.piece_index, width).render(ui) {
                actions.push(match event {
                    GridEvent::Show(index) => UiAction::ShowPiece(index),
                    GridEvent::Display(index) => UiAction::EnterDisplayCollection {
                        id: collection.id.clone(),
                        index,
                    },
                });
            }
        });

        for action in actions {
            self.push_action(action);
        }
    }

    fn render_metadata(&self, ui: &mut Ui, collection: &Collection, piece: Option<&Piece>) {
        let value_color = UI_CONFIG.colors.heading;

        ui.metric(UI_TEXT.pieces_label, &collection.supply_label(), value_color);
        ui.metric(UI_TEXT.chain_label, &collection.chain_label(), value_color);
        ui.metric(UI_TEXT.year_label, &collection.year_or_default().to_string(), value_color);
        let editions = if collection.is_edition_collection() {
            UI_TEXT.editions_yes
        } else {
            UI_TEXT.editions_no
        };
        ui.metric(UI_TEXT.editions_label, editions, value_color);

        let description = piece
            .and_then(|p| p.description.as_deref())
            .or(collection.description.as_deref());
        if let Some(text) = description.filter(|d| !d.trim().is_empty()) {
            ui.add_space(6.0);
            ui.label(text);
        }
        if let Some(note) = collection.artist_note.as_deref().filter(|n| !n.trim().is_empty()) {
            ui.add_space(6.0);
            ui.label_subheader(UI_TEXT.artist_note_heading);
            ui.label(RichText::new(note).italics());
        }

        if let Some(attributes) = piece.map(|p| &p.attributes).filter(|a| !a.is_empty()) {
            ui.add_space(6.0);
            ui.label_subheader(UI_TEXT.traits_heading);
            for attribute in attributes {
                let value = match &attribute.value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                ui.metric(attribute.trait_type.as_deref().unwrap_or("-"), &value, value_color);
            }
        }

        if !collection.marketplaces.is_empty() {
            ui.add_space(6.0);
            ui.label_subheader(UI_TEXT.marketplaces_heading);
            ui.horizontal_wrapped(|ui| {
                for (name, url) in &collection.marketplaces {
                    ui.hyperlink_to(name, url);
                }
            });
        }
        ui.add_space(6.0);
    }

    pub(super) fn render_display_mode(&mut self, ctx: &Context, at: AppInstant) {
        let mut events = Vec::new();
        let counter = self
            .renderer
            .region(Region::Display)
            .text
            .as_ref()
            .map(|t| t.counter.clone())
            .unwrap_or_default();

        TopBottomPanel::bottom("display_controls")
            .exact_height(UI_CONFIG.layout.display_controls_height)
            .frame(Frame::new().fill(UI_CONFIG.colors.display_backdrop).inner_margin(Margin::same(8)))
            .show(ctx, |ui| {
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    events = DisplayControlsPanel::new(counter, self.session.next_tick_in(at)).render(ui);
                });
            });

        CentralPanel::default()
            .frame(Frame::new().fill(UI_CONFIG.colors.display_backdrop))
            .show(ctx, |ui| {
                let view = self.renderer.region(Region::Display);
                let max_size = ui.available_size() - Vec2::new(0.0, 48.0);
                ui.vertical_centered(|ui| {
                    show_region_media(ui, view, max_size.max(Vec2::splat(64.0)));
                    if let Some(text) = &view.text {
                        ui.label(RichText::new(&text.title).color(UI_CONFIG.colors.heading));
                        ui.label_subdued(format!("{} · {}", text.collection_title, text.badge));
                    }
                });
            });

        for event in events {
            self.push_action(match event {
                DisplayEvent::Prev => UiAction::DisplayPrev,
                DisplayEvent::Next => UiAction::DisplayNext,
                DisplayEvent::Shuffle => UiAction::DisplayShuffle,
                DisplayEvent::Close => UiAction::ExitDisplay(DisplayExit::CloseButton),
            });
        }
    }

    pub(super) fn render_lightbox(&mut self, ctx: &Context) {
        let Some(content) = self.lightbox.content().cloned() else {
            return;
        };
        let max_size = ctx.available_rect().size() * 0.9;
        let modal = Modal::new(egui::Id::new("lightbox")).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let image = ui.add(
                    egui::Image::new(to_optimized_url(&content.url))
                        .max_size(max_size)
                        .maintain_aspect_ratio(true)
                        .show_loading_spinner(true)
                        .sense(egui::Sense::click()),
                );
                ui.label(RichText::new(&content.title).color(UI_CONFIG.colors.heading));
                ui.label_subdued(UI_TEXT.lightbox_hint);
                image.clicked()
            })
            .inner
        });
        if modal.inner || modal.should_close() {
            self.push_action(UiAction::CloseLightbox);
        }
    }

    /// Escape leaves display mode first, then closes the lightbox.
    pub(super) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        let (escape, left, right, space) = ctx.input(|i| {
            (
                i.key_pressed(Key::Escape),
                i.key_pressed(Key::ArrowLeft),
                i.key_pressed(Key::ArrowRight),
                i.key_pressed(Key::Space),
            )
        });
        let in_display = self.session.state().is_display();

        if escape {
            if in_display {
                self.push_action(UiAction::ExitDisplay(DisplayExit::Escape));
            } else if self.lightbox.is_open() {
                self.push_action(UiAction::CloseLightbox);
            }
        }
        if in_display {
            if left {
                self.push_action(UiAction::DisplayPrev);
            }
            if right {
                self.push_action(UiAction::DisplayNext);
            }
        } else if space && self.session.state().is_home() && !ctx.wants_keyboard_input() {
            self.push_action(UiAction::ToggleSlideshow);
        }
    }
}
