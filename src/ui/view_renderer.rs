//! View Renderer: the media slots behind each view region.
//!
//! Each region owns one slot per media kind. Presenting a piece always tears
//! every slot down first, then activates at most one, then rewrites the text.
//! Painting code only ever reads this state.

use strum_macros::{Display, EnumIter};

use crate::domain::{Collection, MediaKind, MediaPlan};
use crate::engine::{Selection, SessionEffect};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::ui::utils::format_counter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSlot {
    src: Option<String>,
    visible: bool,
    /// Bumped on every activation so widgets keyed on it restart loading.
    generation: u64,
}

impl MediaSlot {
    fn reset(&mut self) {
        self.src = None;
        self.visible = false;
    }

    fn activate(&mut self, src: &str) {
        self.src = Some(src.to_string());
        self.visible = true;
        self.generation += 1;
    }

    pub fn source(&self) -> Option<&str> {
        self.visible.then_some(self.src.as_deref()).flatten()
    }

    pub fn is_active(&self) -> bool {
        self.source().is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The live media element of a slot set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveMedia<'a> {
    pub kind: MediaKind,
    pub src: &'a str,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSlots {
    image: MediaSlot,
    iframe: MediaSlot,
    video: MediaSlot,
    placeholder: bool,
}

impl MediaSlots {
    /// Hide and clear every slot, stopping whatever was playing.
    pub fn teardown(&mut self) {
        self.image.reset();
        self.iframe.reset();
        self.video.reset();
        self.placeholder = false;
    }

    /// Teardown, then activate exactly the slot the plan names.
    pub fn present(&mut self, plan: &MediaPlan) {
        self.teardown();
        match plan {
            MediaPlan::Image(src) => self.image.activate(src),
            MediaPlan::Iframe(src) => self.iframe.activate(src),
            MediaPlan::Video(src) => self.video.activate(src),
            MediaPlan::Unavailable => self.placeholder = true,
        }
    }

    pub fn active(&self) -> Option<ActiveMedia<'_>> {
        [
            (MediaKind::Image, &self.image),
            (MediaKind::Iframe, &self.iframe),
            (MediaKind::Video, &self.video),
        ]
        .into_iter()
        .find_map(|(kind, slot)| {
            slot.source().map(|src| ActiveMedia {
                kind,
                src,
                generation: slot.generation(),
            })
        })
    }

    pub fn active_count(&self) -> usize {
        [&self.image, &self.iframe, &self.video]
            .iter()
            .filter(|slot| slot.is_active())
            .count()
    }

    pub fn shows_placeholder(&self) -> bool {
        self.placeholder
    }

    /// The plan currently visible, reconstructed from slot state.
    pub fn visible_plan(&self) -> Option<MediaPlan> {
        if self.placeholder {
            return Some(MediaPlan::Unavailable);
        }
        self.active().map(|media| match media.kind {
            MediaKind::Image => MediaPlan::Image(media.src.to_string()),
            MediaKind::Iframe => MediaPlan::Iframe(media.src.to_string()),
            MediaKind::Video => MediaPlan::Video(media.src.to_string()),
            MediaKind::Unavailable => MediaPlan::Unavailable,
        })
    }
}

/// Text shown beside the media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewText {
    pub title: String,
    pub collection_title: String,
    pub badge: String,
    pub chain: String,
    pub counter: String,
}

impl ViewText {
    pub fn for_selection(selection: &Selection) -> Self {
        let collection = &selection.collection;
        Self {
            title: collection.piece_title(selection.piece()),
            collection_title: collection.title.clone(),
            badge: collection.chain_badge(),
            chain: collection.chain_label(),
            counter: format_counter(selection.piece_index, selection.piece_count()),
        }
    }

    pub fn for_collection(collection: &Collection) -> Self {
        Self {
            title: collection.title.clone(),
            collection_title: collection.title.clone(),
            badge: collection.chain_badge(),
            chain: collection.chain_label(),
            counter: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Region {
    Hero,
    Detail,
    Display,
}

#[derive(Debug, Clone, Default)]
pub struct RegionView {
    pub slots: MediaSlots,
    pub text: Option<ViewText>,
    pub selection: Option<Selection>,
}

impl RegionView {
    fn present(&mut self, selection: &Selection) {
        self.slots.present(&selection.plan());
        self.text = Some(ViewText::for_selection(selection));
        self.selection = Some(selection.clone());
    }

    /// Placeholder media with the collection's own text.
    fn present_collection(&mut self, collection: &Collection) {
        self.clear();
        self.text = Some(ViewText::for_collection(collection));
    }

    fn clear(&mut self) {
        self.slots.teardown();
        self.slots.placeholder = true;
        self.text = None;
        self.selection = None;
    }
}

/// All view regions. Only the focused region may hold live media.
#[derive(Debug, Clone, Default)]
pub struct ViewRenderer {
    hero: RegionView,
    detail: RegionView,
    display: RegionView,
}

impl ViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self, region: Region) -> &RegionView {
        match region {
            Region::Hero => &self.hero,
            Region::Detail => &self.detail,
            Region::Display => &self.display,
        }
    }

    fn region_mut(&mut self, region: Region) -> &mut RegionView {
        match region {
            Region::Hero => &mut self.hero,
            Region::Detail => &mut self.detail,
            Region::Display => &mut self.display,
        }
    }

    /// Tear down the other regions, then present `selection` in `region`.
    pub fn render(&mut self, region: Region, selection: &Selection) {
        for other in [Region::Hero, Region::Detail, Region::Display] {
            if other != region {
                self.region_mut(other).slots.teardown();
            }
        }
        self.region_mut(region).present(selection);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_media_slots {
            log::info!(
                "{} slot -> {:?}",
                region,
                self.region(region).slots.visible_plan()
            );
        }
    }

    pub fn clear(&mut self, region: Region) {
        self.region_mut(region).clear();
    }

    /// Tear down the other regions and show `collection` without a piece.
    pub fn render_collection(&mut self, region: Region, collection: &Collection) {
        for other in [Region::Hero, Region::Detail, Region::Display] {
            self.region_mut(other).slots.teardown();
        }
        self.region_mut(region).present_collection(collection);
    }

    /// Carry out a render effect. Returns false for effects that are not renders.
    pub fn apply(&mut self, effect: &SessionEffect) -> bool {
        match effect {
            SessionEffect::ShowHero(selection) => self.render(Region::Hero, selection),
            SessionEffect::ShowDetail(selection) => self.render(Region::Detail, selection),
            SessionEffect::ShowDisplay(selection) => self.render(Region::Display, selection),
            SessionEffect::ShowCollection(collection) => {
                self.render_collection(Region::Detail, collection)
            }
            SessionEffect::ClearHero => self.clear(Region::Hero),
            SessionEffect::RequestFullscreen | SessionEffect::ReleaseFullscreen => return false,
        }
        true
    }

    pub fn total_active(&self) -> usize {
        self.hero.slots.active_count()
            + self.detail.slots.active_count()
            + self.display.slots.active_count()
    }
}
