use eframe::egui::{ComboBox, Grid, RichText, ScrollArea, Ui};
use std::time::Duration;
use strum::IntoEnumIterator;

use crate::data::{ChainFilter, TimelineYear};
use crate::domain::{Chain, Collection, resolve_thumbnail};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::media_view::show_thumbnail;
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{format_countdown, section_heading};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Side panel: chain filter plus collections grouped by year.
pub struct TimelinePanel<'a> {
    timeline: &'a [TimelineYear],
    filter: ChainFilter,
    selected_id: Option<&'a str>,
}

impl<'a> TimelinePanel<'a> {
    pub fn new(timeline: &'a [TimelineYear], filter: ChainFilter, selected_id: Option<&'a str>) -> Self {
        Self {
            timeline,
            filter,
            selected_id,
        }
    }

    fn filter_label(filter: ChainFilter) -> String {
        match filter {
            ChainFilter::All => UI_TEXT.filter_all.to_string(),
            ChainFilter::Only(chain) => chain.badge().to_string(),
        }
    }

    fn render_filter(&mut self, ui: &mut Ui) -> Option<ChainFilter> {
        let previous = self.filter;
        ui.label_subheader(UI_TEXT.filter_heading);
        ComboBox::from_id_salt("chain_filter")
            .selected_text(Self::filter_label(self.filter))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.filter, ChainFilter::All, UI_TEXT.filter_all);
                for chain in Chain::iter() {
                    ui.selectable_value(&mut self.filter, ChainFilter::Only(chain), chain.badge());
                }
            });
        (self.filter != previous).then_some(self.filter)
    }

    fn render_years(&self, ui: &mut Ui) -> Option<String> {
        let mut opened = None;
        ScrollArea::vertical().id_salt("timeline").show(ui, |ui| {
            for year in self.timeline {
                ui.add_space(6.0);
                ui.label(RichText::new(year.year.to_string()).strong().color(UI_CONFIG.colors.heading));
                for entry in &year.entries {
                    let is_selected = self.selected_id == Some(entry.id.as_str());
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&entry.badge)
                                .small()
                                .monospace()
                                .color(UI_CONFIG.chain_color(Chain::parse(&entry.chain))),
                        );
                        if ui.selectable_label(is_selected, &entry.title).clicked() {
                            opened = Some(entry.id.clone());
                        }
                        ui.label_subdued(&entry.count_label);
                    });
                }
            }
        });
        opened
    }
}

#[derive(Debug)]
pub enum TimelineEvent {
    Filter(ChainFilter),
    Open(String),
}

impl<'a> Panel for TimelinePanel<'a> {
    type Event = TimelineEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.timeline_heading);

        if let Some(filter) = self.render_filter(ui) {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Chain filter changed: {:?}", filter);
            }
            events.push(TimelineEvent::Filter(filter));
        }
        ui.separator();

        if self.timeline.is_empty() {
            ui.label_subdued(UI_TEXT.catalog_empty);
        }
        if let Some(id) = self.render_years(ui) {
            events.push(TimelineEvent::Open(id));
        }
        events
    }
}

/// Thumbnail grid of a collection's pieces.
pub struct PiecesGridPanel<'a> {
    collection: &'a Collection,
    current: usize,
    columns: usize,
}

impl<'a> PiecesGridPanel<'a> {
    pub fn new(collection: &'a Collection, current: usize, available_width: f32) -> Self {
        let cell = UI_CONFIG.layout.thumbnail_size + UI_CONFIG.layout.grid_spacing;
        let columns = ((available_width / cell).floor() as usize).max(1);
        Self {
            collection,
            current,
            columns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    Show(usize),
    Display(usize),
}

impl<'a> Panel for PiecesGridPanel<'a> {
    type Event = GridEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        if self.collection.representative_only {
            return events;
        }
        ui.label_subheader(format!("{} ({})", UI_TEXT.grid_heading, self.collection.pieces.len()));
        Grid::new(("pieces_grid", &self.collection.id))
            .spacing([UI_CONFIG.layout.grid_spacing; 2])
            .show(ui, |ui| {
                for (index, piece) in self.collection.pieces.iter().enumerate() {
                    ui.vertical(|ui| {
                        let plan = resolve_thumbnail(self.collection, piece);
                        let thumb = show_thumbnail(ui, &plan, UI_CONFIG.layout.thumbnail_size);
                        if thumb.clicked() {
                            events.push(GridEvent::Show(index));
                        }
                        ui.horizontal(|ui| {
                            let title = self.collection.piece_title(piece);
                            let text = if index == self.current {
                                RichText::new(title).small().strong()
                            } else {
                                RichText::new(title).small()
                            };
                            ui.label(text);
                            if ui.small_button(UI_TEXT.display_piece).clicked() {
                                events.push(GridEvent::Display(index));
                            }
                        });
                    });
                    if (index + 1) % self.columns == 0 {
                        ui.end_row();
                    }
                }
            });
        events
    }
}

/// Bottom bar of display mode.
pub struct DisplayControlsPanel {
    counter: String,
    next_in: Option<Duration>,
}

impl DisplayControlsPanel {
    pub fn new(counter: String, next_in: Option<Duration>) -> Self {
        Self { counter, next_in }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    Prev,
    Next,
    Shuffle,
    Close,
}

impl Panel for DisplayControlsPanel {
    type Event = DisplayEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            if ui.button(UI_TEXT.display_prev).clicked() {
                events.push(DisplayEvent::Prev);
            }
            ui.label_subdued(&self.counter);
            if ui.button(UI_TEXT.display_next).clicked() {
                events.push(DisplayEvent::Next);
            }
            if ui.button(UI_TEXT.display_shuffle).clicked() {
                events.push(DisplayEvent::Shuffle);
            }
            if let Some(left) = self.next_in {
                ui.label_subdued(format!("{} {}", UI_TEXT.display_next_in, format_countdown(left)));
            }
            if ui.button(UI_TEXT.display_close).clicked() {
                events.push(DisplayEvent::Close);
            }
        });
        events
    }
}
