//! Timer/Session Controller.
//!
//! One authoritative state plus the two repeating timers. Every operation
//! returns the render instructions the view layer must carry out, so the
//! controller itself never touches a media slot.

use rand::Rng;
use std::sync::Arc;
use strum_macros::IntoStaticStr;

use super::selection::{Selection, SelectionEngine};
use super::timer::RepeatingTimer;
use crate::config::GalleryTimings;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::Catalog;
use crate::domain::{Collection, GalleryError};
use crate::utils::app_time::AppInstant;

/// What display mode rotates through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayScope {
    AllCollections,
    Collection(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySession {
    pub scope: DisplayScope,
    pub current: Selection,
}

#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum SessionState {
    #[strum(serialize = "Home-Slideshow-Running")]
    SlideshowRunning,
    #[strum(serialize = "Home-Slideshow-Paused")]
    SlideshowPaused,
    /// `selection` is `None` for a collection with no pieces at all.
    #[strum(serialize = "Detail-View")]
    Detail {
        collection: Arc<Collection>,
        selection: Option<Selection>,
    },
    /// `resume` is the state display mode was entered from.
    #[strum(serialize = "Display-Mode")]
    Display {
        session: DisplaySession,
        resume: Box<SessionState>,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Self::SlideshowRunning | Self::SlideshowPaused)
    }

    pub fn is_display(&self) -> bool {
        matches!(self, Self::Display { .. })
    }
}

/// Render instruction produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    ShowHero(Selection),
    /// Home has nothing to show
    ClearHero,
    ShowDetail(Selection),
    /// Detail view of a collection that has nothing to show but its metadata
    ShowCollection(Arc<Collection>),
    ShowDisplay(Selection),
    RequestFullscreen,
    ReleaseFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayExit {
    CloseButton,
    Escape,
    /// The window left fullscreen on its own
    FullscreenLost,
}

pub struct SessionController {
    catalog: Arc<Catalog>,
    pool: Vec<Arc<Collection>>,
    state: SessionState,
    hero: Option<Selection>,
    /// Next slideshow pick, drawn one step early so it can be preloaded
    queued_hero: Option<Selection>,
    slideshow_picks: SelectionEngine,
    display_picks: SelectionEngine,
    slideshow_timer: RepeatingTimer,
    display_timer: RepeatingTimer,
}

impl SessionController {
    pub fn new(catalog: Arc<Catalog>, timings: GalleryTimings) -> Self {
        let pool = catalog.eligible();
        Self {
            catalog,
            pool,
            state: SessionState::SlideshowRunning,
            hero: None,
            queued_hero: None,
            slideshow_picks: SelectionEngine::new(),
            display_picks: SelectionEngine::new(),
            slideshow_timer: RepeatingTimer::new(timings.slideshow),
            display_timer: RepeatingTimer::new(timings.display),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn hero(&self) -> Option<&Selection> {
        self.hero.as_ref()
    }

    pub fn display(&self) -> Option<&DisplaySession> {
        match &self.state {
            SessionState::Display { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&Selection> {
        match &self.state {
            SessionState::Detail { selection, .. } => selection.as_ref(),
            _ => None,
        }
    }

    /// The collection open in the detail view, with or without a piece.
    pub fn detail_collection(&self) -> Option<&Arc<Collection>> {
        match &self.state {
            SessionState::Detail { collection, .. } => Some(collection),
            _ => None,
        }
    }

    pub fn slideshow_running(&self) -> bool {
        self.slideshow_timer.is_running()
    }

    pub fn display_timer_running(&self) -> bool {
        self.display_timer.is_running()
    }

    /// Time until the active timer fires, if any.
    pub fn next_tick_in(&self, now: AppInstant) -> Option<std::time::Duration> {
        self.slideshow_timer
            .time_left(now)
            .or_else(|| self.display_timer.time_left(now))
    }

    /// App start: pick the first hero and start the slideshow.
    pub fn start<R: Rng + ?Sized>(&mut self, now: AppInstant, rng: &mut R) -> Vec<SessionEffect> {
        self.display_timer.stop();
        self.transition(SessionState::SlideshowRunning);
        self.slideshow_timer.restart(now);
        vec![self.advance_hero(rng)]
    }

    /// Poll whichever timer is active.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: AppInstant, rng: &mut R) -> Vec<SessionEffect> {
        if self.slideshow_timer.poll(now) {
            return vec![self.advance_hero(rng)];
        }
        if self.display_timer.poll(now) {
            return self.advance_display(rng).into_iter().collect();
        }
        Vec::new()
    }

    /// Play/pause at home. Has no effect outside the home view.
    pub fn toggle_slideshow(&mut self, now: AppInstant) -> Vec<SessionEffect> {
        match self.state {
            SessionState::SlideshowRunning => {
                self.slideshow_timer.stop();
                self.transition(SessionState::SlideshowPaused);
            }
            SessionState::SlideshowPaused => {
                self.slideshow_timer.restart(now);
                self.transition(SessionState::SlideshowRunning);
            }
            _ => {}
        }
        Vec::new()
    }

    pub fn open_detail(&mut self, collection_id: &str) -> Result<Vec<SessionEffect>, GalleryError> {
        self.open_detail_at(collection_id, 0)
    }

    /// Open a collection, leaving display mode if needed.
    pub fn open_detail_at(
        &mut self,
        collection_id: &str,
        piece_index: usize,
    ) -> Result<Vec<SessionEffect>, GalleryError> {
        let collection = Arc::clone(self.catalog.require(collection_id)?);
        let selection = if collection.has_pieces() {
            Some(self.selection_for(collection_id, piece_index)?)
        } else {
            None
        };
        let mut effects = Vec::new();
        if self.state.is_display() {
            self.display_timer.stop();
            effects.push(SessionEffect::ReleaseFullscreen);
        }
        self.slideshow_timer.stop();
        effects.push(detail_effect(&collection, selection.as_ref()));
        self.transition(SessionState::Detail {
            collection,
            selection,
        });
        Ok(effects)
    }

    /// The collection currently in the hero, opened in the detail view.
    pub fn open_hero_collection(&mut self) -> Result<Vec<SessionEffect>, GalleryError> {
        let hero = self.hero.clone().ok_or(GalleryError::CatalogEmpty)?;
        self.open_detail_at(hero.collection_id(), hero.piece_index)
    }

    /// Switch the main piece of the open detail view.
    pub fn show_piece(&mut self, piece_index: usize) -> Result<Vec<SessionEffect>, GalleryError> {
        let SessionState::Detail { collection, .. } = &self.state else {
            return Ok(Vec::new());
        };
        let collection = Arc::clone(collection);
        let next = Selection::new(Arc::clone(&collection), piece_index).ok_or_else(|| {
            GalleryError::PieceOutOfRange {
                collection: collection.id.clone(),
                index: piece_index,
            }
        })?;
        self.state = SessionState::Detail {
            collection,
            selection: Some(next.clone()),
        };
        Ok(vec![SessionEffect::ShowDetail(next)])
    }

    pub fn go_home<R: Rng + ?Sized>(&mut self, now: AppInstant, rng: &mut R) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        if self.state.is_display() {
            self.display_timer.stop();
            effects.push(SessionEffect::ReleaseFullscreen);
        }
        self.slideshow_timer.start(now);
        self.transition(SessionState::SlideshowRunning);
        effects.push(match self.hero.clone() {
            Some(hero) => SessionEffect::ShowHero(hero),
            None => self.advance_hero(rng),
        });
        effects
    }

    /// Display mode across the whole catalog.
    pub fn enter_display_all<R: Rng + ?Sized>(
        &mut self,
        now: AppInstant,
        rng: &mut R,
    ) -> Result<Vec<SessionEffect>, GalleryError> {
        let current = self
            .display_picks
            .pick_next(&self.pool, rng)
            .ok_or(GalleryError::CatalogEmpty)?;
        Ok(self.enter_display(DisplayScope::AllCollections, current, now))
    }

    /// Display mode rotating through one collection, starting at `piece_index`.
    pub fn enter_display_collection(
        &mut self,
        collection_id: &str,
        piece_index: usize,
        now: AppInstant,
    ) -> Result<Vec<SessionEffect>, GalleryError> {
        let current = self.selection_for(collection_id, piece_index)?;
        self.display_picks.note_shown(collection_id);
        let scope = DisplayScope::Collection(collection_id.to_string());
        Ok(self.enter_display(scope, current, now))
    }

    pub fn exit_display(&mut self, reason: DisplayExit, now: AppInstant) -> Vec<SessionEffect> {
        let SessionState::Display { resume, .. } = &self.state else {
            return Vec::new();
        };
        let resume = (**resume).clone();
        self.display_timer.stop();

        let mut effects = Vec::new();
        if reason != DisplayExit::FullscreenLost {
            effects.push(SessionEffect::ReleaseFullscreen);
        }
        match &resume {
            SessionState::SlideshowRunning => {
                self.slideshow_timer.restart(now);
                effects.push(self.hero_effect());
            }
            SessionState::SlideshowPaused => effects.push(self.hero_effect()),
            SessionState::Detail {
                collection,
                selection,
            } => effects.push(detail_effect(collection, selection.as_ref())),
            SessionState::Display { .. } => {}
        }
        self.transition(resume);
        effects
    }

    pub fn display_next(&mut self, now: AppInstant) -> Vec<SessionEffect> {
        self.display_step(1, now)
    }

    pub fn display_prev(&mut self, now: AppInstant) -> Vec<SessionEffect> {
        self.display_step(-1, now)
    }

    pub fn display_shuffle<R: Rng + ?Sized>(
        &mut self,
        now: AppInstant,
        rng: &mut R,
    ) -> Vec<SessionEffect> {
        let SessionState::Display { session, .. } = &self.state else {
            return Vec::new();
        };
        let next = match &session.scope {
            DisplayScope::AllCollections => self.display_picks.pick_next(&self.pool, rng),
            DisplayScope::Collection(_) => {
                let collection = Arc::clone(&session.current.collection);
                let index = rng.gen_range(0..collection.pieces.len().max(1));
                Selection::new(collection, index)
            }
        };
        self.display_timer.restart(now);
        next.map(|selection| self.set_display_current(selection))
            .into_iter()
            .collect()
    }

    /// Upcoming pieces worth preloading: the queued slideshow pick at home,
    /// otherwise the following pieces of the current collection.
    pub fn upcoming(&self, count: usize) -> Vec<Selection> {
        let base = match &self.state {
            SessionState::SlideshowRunning | SessionState::SlideshowPaused => {
                return self.queued_hero.iter().take(count).cloned().collect();
            }
            SessionState::Detail { selection, .. } => selection.as_ref(),
            SessionState::Display { session, .. } => Some(&session.current),
        };
        let Some(base) = base else {
            return Vec::new();
        };
        let len = base.piece_count();
        (1..=count.min(len.saturating_sub(1)))
            .map(|step| base.stepped(step as isize))
            .collect()
    }

    fn enter_display(
        &mut self,
        scope: DisplayScope,
        current: Selection,
        now: AppInstant,
    ) -> Vec<SessionEffect> {
        self.slideshow_timer.stop();
        let resume = match &self.state {
            // Re-entering keeps the original way back
            SessionState::Display { resume, .. } => resume.clone(),
            other => Box::new(other.clone()),
        };
        self.transition(SessionState::Display {
            session: DisplaySession {
                scope,
                current: current.clone(),
            },
            resume,
        });
        self.display_timer.restart(now);
        vec![
            SessionEffect::RequestFullscreen,
            SessionEffect::ShowDisplay(current),
        ]
    }

    fn display_step(&mut self, step: isize, now: AppInstant) -> Vec<SessionEffect> {
        let Some(session) = self.display() else {
            return Vec::new();
        };
        let next = session.current.stepped(step);
        self.display_timer.restart(now);
        vec![self.set_display_current(next)]
    }

    fn advance_display<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SessionEffect> {
        let SessionState::Display { session, .. } = &self.state else {
            return None;
        };
        let next = match &session.scope {
            DisplayScope::AllCollections => self.display_picks.pick_next(&self.pool, rng)?,
            DisplayScope::Collection(_) => session.current.stepped(1),
        };
        Some(self.set_display_current(next))
    }

    fn set_display_current(&mut self, selection: Selection) -> SessionEffect {
        if let SessionState::Display { session, .. } = &mut self.state {
            session.current = selection.clone();
        }
        SessionEffect::ShowDisplay(selection)
    }

    fn advance_hero<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SessionEffect {
        let next = match self.queued_hero.take() {
            Some(queued) => Some(queued),
            None => self.slideshow_picks.pick_next(&self.pool, rng),
        };
        if let Some(next) = next {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_selection_picks {
                log::info!(
                    "Slideshow pick: {} #{}",
                    next.collection_id(),
                    next.piece_index
                );
            }
            self.hero = Some(next);
            self.queued_hero = self.slideshow_picks.pick_next(&self.pool, rng);
        }
        self.hero_effect()
    }

    fn hero_effect(&self) -> SessionEffect {
        match &self.hero {
            Some(hero) => SessionEffect::ShowHero(hero.clone()),
            None => SessionEffect::ClearHero,
        }
    }

    fn selection_for(&self, collection_id: &str, piece_index: usize) -> Result<Selection, GalleryError> {
        let collection = self.catalog.require(collection_id)?;
        Selection::new(Arc::clone(collection), piece_index).ok_or_else(|| {
            GalleryError::PieceOutOfRange {
                collection: collection_id.to_string(),
                index: piece_index,
            }
        })
    }

    fn transition(&mut self, next: SessionState) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_session_transitions && self.state.name() != next.name() {
            log::info!("Session: {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
        debug_assert!(
            !(self.slideshow_timer.is_running() && self.display_timer.is_running()),
            "slideshow and display timers must never run together"
        );
    }
}

fn detail_effect(collection: &Arc<Collection>, selection: Option<&Selection>) -> SessionEffect {
    match selection {
        Some(selection) => SessionEffect::ShowDetail(selection.clone()),
        None => SessionEffect::ShowCollection(Arc::clone(collection)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Collection, Piece};
    use crate::utils::app_time::now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn collection(id: &str, pieces: usize) -> Collection {
        Collection {
            id: id.to_string(),
            title: id.to_uppercase(),
            pieces: (0..pieces)
                .map(|i| Piece {
                    token_id: i.to_string(),
                    image: Some(format!("https://media.example/{id}/{i}.png")),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn controller() -> SessionController {
        let catalog = Catalog::new(vec![collection("a", 3), collection("b", 2), collection("c", 4)]);
        let timings = GalleryTimings {
            slideshow: Duration::from_secs(10),
            display: Duration::from_secs(15),
        };
        SessionController::new(Arc::new(catalog), timings)
    }

    fn assert_exclusive(ctl: &SessionController) {
        assert!(!(ctl.slideshow_running() && ctl.display_timer_running()));
    }

    #[test]
    fn start_shows_hero_and_runs_slideshow() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(11);
        let t0 = now();
        let effects = ctl.start(t0, &mut rng);
        assert!(matches!(effects.as_slice(), [SessionEffect::ShowHero(_)]));
        assert_eq!(ctl.state().name(), "Home-Slideshow-Running");
        assert!(ctl.slideshow_running());

        assert!(ctl.tick(t0 + Duration::from_secs(5), &mut rng).is_empty());
        let first = ctl.hero().cloned().unwrap();
        let effects = ctl.tick(t0 + Duration::from_secs(10), &mut rng);
        let [SessionEffect::ShowHero(next)] = effects.as_slice() else {
            panic!("expected a hero render, got {effects:?}");
        };
        assert_ne!(next.collection_id(), first.collection_id());
    }

    #[test]
    fn pause_stops_ticks() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(2);
        let t0 = now();
        ctl.start(t0, &mut rng);
        ctl.toggle_slideshow(t0);
        assert_eq!(ctl.state(), &SessionState::SlideshowPaused);
        assert!(ctl.tick(t0 + Duration::from_secs(30), &mut rng).is_empty());
        ctl.toggle_slideshow(t0 + Duration::from_secs(30));
        assert!(ctl.slideshow_running());
    }

    #[test]
    fn detail_stops_slideshow_and_home_restarts_it() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(3);
        let t0 = now();
        ctl.start(t0, &mut rng);

        let effects = ctl.open_detail("b").unwrap();
        assert!(matches!(effects.as_slice(), [SessionEffect::ShowDetail(s)] if s.collection_id() == "b"));
        assert!(!ctl.slideshow_running());
        assert!(ctl.tick(t0 + Duration::from_secs(60), &mut rng).is_empty());

        ctl.show_piece(1).unwrap();
        assert_eq!(ctl.detail().unwrap().piece_index, 1);
        assert_eq!(
            ctl.show_piece(9),
            Err(GalleryError::PieceOutOfRange {
                collection: "b".into(),
                index: 9
            })
        );
        assert_eq!(ctl.detail().unwrap().piece_index, 1);

        let hero = ctl.hero().cloned();
        let effects = ctl.go_home(t0 + Duration::from_secs(60), &mut rng);
        assert_eq!(effects, vec![SessionEffect::ShowHero(hero.unwrap())]);
        assert!(ctl.slideshow_running());
    }

    #[test]
    fn unknown_collection_leaves_state_untouched() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(4);
        ctl.start(now(), &mut rng);
        assert_eq!(
            ctl.open_detail("missing"),
            Err(GalleryError::UnknownCollection("missing".into()))
        );
        assert_eq!(ctl.state(), &SessionState::SlideshowRunning);
        assert!(ctl.slideshow_running());
    }

    #[test]
    fn display_from_home_swaps_timers_and_restores_hero() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(5);
        let t0 = now();
        ctl.start(t0, &mut rng);
        let hero = ctl.hero().cloned().unwrap();

        let effects = ctl.enter_display_all(t0, &mut rng).unwrap();
        assert_eq!(effects[0], SessionEffect::RequestFullscreen);
        assert!(matches!(effects[1], SessionEffect::ShowDisplay(_)));
        assert!(!ctl.slideshow_running());
        assert!(ctl.display_timer_running());
        assert_exclusive(&ctl);

        // Display ticks on its own period
        assert!(ctl.tick(t0 + Duration::from_secs(10), &mut rng).is_empty());
        assert_eq!(ctl.tick(t0 + Duration::from_secs(15), &mut rng).len(), 1);
        assert_eq!(ctl.hero(), Some(&hero));

        let effects = ctl.exit_display(DisplayExit::Escape, t0 + Duration::from_secs(20));
        assert_eq!(
            effects,
            vec![SessionEffect::ReleaseFullscreen, SessionEffect::ShowHero(hero)]
        );
        assert_eq!(ctl.state(), &SessionState::SlideshowRunning);
        assert!(ctl.slideshow_running());
        assert!(!ctl.display_timer_running());
    }

    #[test]
    fn display_from_paused_home_stays_paused() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(6);
        let t0 = now();
        ctl.start(t0, &mut rng);
        ctl.toggle_slideshow(t0);
        ctl.enter_display_all(t0, &mut rng).unwrap();
        ctl.exit_display(DisplayExit::CloseButton, t0);
        assert_eq!(ctl.state(), &SessionState::SlideshowPaused);
        assert!(!ctl.slideshow_running());
        assert!(!ctl.display_timer_running());
    }

    #[test]
    fn collection_display_cycles_and_returns_to_detail() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(7);
        let t0 = now();
        ctl.start(t0, &mut rng);
        ctl.open_detail("a").unwrap();

        ctl.enter_display_collection("a", 2, t0).unwrap();
        let effects = ctl.tick(t0 + Duration::from_secs(15), &mut rng);
        let [SessionEffect::ShowDisplay(sel)] = effects.as_slice() else {
            panic!("expected a display render, got {effects:?}");
        };
        assert_eq!((sel.collection_id(), sel.piece_index), ("a", 0));

        ctl.display_prev(t0 + Duration::from_secs(16));
        assert_eq!(ctl.display().unwrap().current.piece_index, 2);

        for _ in 0..20 {
            ctl.display_shuffle(t0 + Duration::from_secs(17), &mut rng);
            assert_eq!(ctl.display().unwrap().current.collection_id(), "a");
        }

        let effects = ctl.exit_display(DisplayExit::FullscreenLost, t0 + Duration::from_secs(18));
        assert!(matches!(effects.as_slice(), [SessionEffect::ShowDetail(s)] if s.collection_id() == "a"));
        assert!(ctl.detail().is_some());
        assert!(!ctl.slideshow_running());
        assert!(!ctl.display_timer_running());
    }

    #[test]
    fn manual_navigation_restarts_countdown() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(8);
        let t0 = now();
        ctl.enter_display_collection("c", 0, t0).unwrap();

        ctl.display_next(t0 + Duration::from_secs(12));
        assert!(ctl.tick(t0 + Duration::from_secs(15), &mut rng).is_empty());
        assert_eq!(
            ctl.next_tick_in(t0 + Duration::from_secs(15)),
            Some(Duration::from_secs(12))
        );
        assert_eq!(ctl.tick(t0 + Duration::from_secs(27), &mut rng).len(), 1);
        assert_eq!(ctl.display().unwrap().current.piece_index, 2);
    }

    #[test]
    fn all_collections_display_steps_within_current_collection() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(9);
        let t0 = now();
        ctl.enter_display_all(t0, &mut rng).unwrap();
        let start = ctl.display().unwrap().current.clone();
        ctl.display_next(t0);
        let next = &ctl.display().unwrap().current;
        assert_eq!(next.collection_id(), start.collection_id());
        assert_eq!(next.piece_index, (start.piece_index + 1) % start.piece_count());

        let mut previous = next.collection_id().to_string();
        for _ in 0..50 {
            ctl.display_shuffle(t0, &mut rng);
            let id = ctl.display().unwrap().current.collection_id().to_string();
            assert_ne!(id, previous);
            previous = id;
        }
    }

    #[test]
    fn leaving_display_for_detail_releases_fullscreen() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(10);
        let t0 = now();
        ctl.start(t0, &mut rng);
        ctl.enter_display_all(t0, &mut rng).unwrap();
        let effects = ctl.open_detail("c").unwrap();
        assert_eq!(effects[0], SessionEffect::ReleaseFullscreen);
        assert!(!ctl.display_timer_running());
        assert!(!ctl.slideshow_running());
    }

    #[test]
    fn empty_catalog_degrades_to_placeholder() {
        let mut ctl = SessionController::new(Arc::new(Catalog::default()), GalleryTimings::default());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ctl.start(now(), &mut rng), vec![SessionEffect::ClearHero]);
        assert_eq!(ctl.enter_display_all(now(), &mut rng), Err(GalleryError::CatalogEmpty));
        assert_eq!(ctl.open_hero_collection(), Err(GalleryError::CatalogEmpty));
        assert!(ctl.state().is_home());
    }

    #[test]
    fn bare_collection_opens_with_metadata_only() {
        let bare = Collection {
            id: "bare".into(),
            title: "Bare".into(),
            supply: Some(10),
            ..Default::default()
        };
        let catalog = Catalog::new(vec![bare, collection("a", 2)]);
        let mut ctl = SessionController::new(Arc::new(catalog), GalleryTimings::default());
        let mut rng = StdRng::seed_from_u64(12);
        let t0 = now();
        ctl.start(t0, &mut rng);

        let effects = ctl.open_detail("bare").unwrap();
        assert!(
            matches!(effects.as_slice(), [SessionEffect::ShowCollection(c)] if c.id == "bare"),
            "got {effects:?}"
        );
        assert_eq!(ctl.state().name(), "Detail-View");
        assert_eq!(ctl.detail_collection().map(|c| c.supply), Some(Some(10)));
        assert!(ctl.detail().is_none());
        assert!(!ctl.slideshow_running());
        assert!(ctl.upcoming(3).is_empty());

        assert!(ctl.show_piece(0).is_err());
        assert!(ctl.enter_display_collection("bare", 0, t0).is_err());
        assert_eq!(ctl.detail_collection().map(|c| c.id.as_str()), Some("bare"));

        // Never drawn by the slideshow
        for step in 1..=20 {
            ctl.go_home(t0, &mut rng);
            ctl.tick(t0 + Duration::from_secs(10 * step), &mut rng);
            assert_eq!(ctl.hero().map(|h| h.collection_id()), Some("a"));
            ctl.open_detail("bare").unwrap();
        }
    }

    #[test]
    fn home_preloads_the_queued_pick() {
        let mut ctl = controller();
        let mut rng = StdRng::seed_from_u64(13);
        let t0 = now();
        ctl.start(t0, &mut rng);
        let queued = ctl.upcoming(3);
        assert_eq!(queued.len(), 1);
        assert_ne!(queued[0].collection_id(), ctl.hero().unwrap().collection_id());

        ctl.tick(t0 + Duration::from_secs(10), &mut rng);
        assert_eq!(ctl.hero(), Some(&queued[0]));
    }

    #[test]
    fn upcoming_looks_ahead_within_collection() {
        let mut ctl = controller();
        ctl.open_detail_at("c", 3).unwrap();
        let ahead: Vec<usize> = ctl.upcoming(2).iter().map(|s| s.piece_index).collect();
        assert_eq!(ahead, vec![0, 1]);
        ctl.open_detail("b").unwrap();
        assert_eq!(ctl.upcoming(5).len(), 1);
    }
}
