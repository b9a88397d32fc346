//! Selection Engine: random picks that avoid repeating the previous collection.

use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;

use crate::domain::{Collection, MediaPlan, Piece, resolve, to_optimized_url};

/// A piece chosen for display, together with the collection that owns it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub collection: Arc<Collection>,
    pub piece_index: usize,
}

impl Selection {
    /// `None` when the index is out of range.
    pub fn new(collection: Arc<Collection>, piece_index: usize) -> Option<Self> {
        (piece_index < collection.pieces.len()).then_some(Self {
            collection,
            piece_index,
        })
    }

    pub fn piece(&self) -> &Piece {
        // Index validated on construction
        &self.collection.pieces[self.piece_index]
    }

    pub fn collection_id(&self) -> &str {
        &self.collection.id
    }

    pub fn piece_count(&self) -> usize {
        self.collection.pieces.len()
    }

    pub fn plan(&self) -> MediaPlan {
        resolve(&self.collection, self.piece())
    }

    /// The still a view paints for this piece: the planned image, or the
    /// poster shown in place of live media.
    pub fn preview_url(&self) -> Option<String> {
        match self.plan() {
            MediaPlan::Image(url) => Some(url),
            _ => self.piece().static_image().map(to_optimized_url),
        }
    }

    /// Same collection, index moved by `step` with wrap-around.
    pub fn stepped(&self, step: isize) -> Self {
        let len = self.piece_count() as isize;
        let index = (self.piece_index as isize + step).rem_euclid(len.max(1)) as usize;
        Self {
            collection: Arc::clone(&self.collection),
            piece_index: index,
        }
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.collection.id == other.collection.id && self.piece_index == other.piece_index
    }
}

impl Eq for Selection {}

/// Pick a random collection (other than `exclude` where possible) and a random piece in it.
///
/// The exclusion is waived when it would leave nothing to pick; `None` only
/// when no collection in `pool` has a piece.
pub fn pick_excluding<R: Rng + ?Sized>(
    pool: &[Arc<Collection>],
    exclude: Option<&str>,
    rng: &mut R,
) -> Option<Selection> {
    let eligible: Vec<&Arc<Collection>> = pool.iter().filter(|c| c.has_pieces()).collect();
    let filtered: Vec<&Arc<Collection>> = eligible
        .iter()
        .copied()
        .filter(|c| Some(c.id.as_str()) != exclude)
        .collect();
    let candidates = if filtered.is_empty() { &eligible } else { &filtered };

    let collection = *candidates.choose(rng)?;
    let piece_index = rng.gen_range(0..collection.pieces.len());
    Selection::new(Arc::clone(collection), piece_index)
}

/// Repetition bias for one viewing session (home slideshow or display mode).
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    last_shown: Option<String>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick_next<R: Rng + ?Sized>(
        &mut self,
        pool: &[Arc<Collection>],
        rng: &mut R,
    ) -> Option<Selection> {
        let selection = pick_excluding(pool, self.last_shown.as_deref(), rng)?;
        self.last_shown = Some(selection.collection_id().to_string());
        Some(selection)
    }

    /// Record a collection shown by other means (e.g. chosen by the user).
    pub fn note_shown(&mut self, collection_id: &str) {
        self.last_shown = Some(collection_id.to_string());
    }

    pub fn last_shown(&self) -> Option<&str> {
        self.last_shown.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn collection(id: &str, pieces: usize) -> Arc<Collection> {
        Arc::new(Collection {
            id: id.to_string(),
            pieces: (0..pieces)
                .map(|i| Piece {
                    token_id: i.to_string(),
                    image: Some(format!("https://media.example/{id}/{i}.png")),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        })
    }

    #[test]
    fn never_repeats_collection_with_two_or_more_eligible() {
        let pool = vec![collection("a", 3), collection("b", 1), collection("c", 0), collection("d", 5)];
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = SelectionEngine::new();

        let mut previous: Option<String> = None;
        for _ in 0..1000 {
            let pick = engine.pick_next(&pool, &mut rng).unwrap();
            assert_ne!(pick.collection_id(), "c");
            assert!(pick.piece_index < pick.piece_count());
            assert_ne!(Some(pick.collection_id().to_string()), previous);
            previous = Some(pick.collection_id().to_string());
            assert_eq!(engine.last_shown(), previous.as_deref());
        }
    }

    #[test]
    fn preview_is_the_still_behind_live_media() {
        let live = Arc::new(Collection {
            id: "live".into(),
            chain: "ethereum".into(),
            onchain: true,
            pieces: vec![
                Piece {
                    image: Some("https://media.example/1.png".into()),
                    animation_url: Some("https://gen.example/1.html".into()),
                    ..Default::default()
                },
                Piece {
                    animation_url: Some("https://gen.example/2.html".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        let framed = Selection::new(Arc::clone(&live), 0).unwrap();
        assert_eq!(framed.plan().kind(), crate::domain::MediaKind::Iframe);
        assert_eq!(framed.preview_url().as_deref(), Some("https://media.example/1.png"));
        assert_eq!(Selection::new(live, 1).unwrap().preview_url(), None);

        let still = Selection::new(collection("a", 1), 0).unwrap();
        assert_eq!(still.preview_url().as_deref(), Some("https://media.example/a/0.png"));
    }

    #[test]
    fn single_eligible_collection_waives_exclusion() {
        let pool = vec![collection("only", 2), collection("empty", 0)];
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = SelectionEngine::new();
        for _ in 0..50 {
            let pick = engine.pick_next(&pool, &mut rng).unwrap();
            assert_eq!(pick.collection_id(), "only");
        }
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = SelectionEngine::new();
        assert!(engine.pick_next(&[], &mut rng).is_none());
        assert!(engine.pick_next(&[collection("e", 0)], &mut rng).is_none());
        assert_eq!(engine.last_shown(), None);
    }

    #[test]
    fn instances_do_not_share_state() {
        let pool = vec![collection("a", 1), collection("b", 1)];
        let mut rng = StdRng::seed_from_u64(3);
        let mut slideshow = SelectionEngine::new();
        let display = SelectionEngine::new();
        slideshow.pick_next(&pool, &mut rng);
        assert!(slideshow.last_shown().is_some());
        assert!(display.last_shown().is_none());
    }

    #[test]
    fn stepping_wraps_both_ways() {
        let sel = Selection::new(collection("a", 3), 0).unwrap();
        assert_eq!(sel.stepped(-1).piece_index, 2);
        assert_eq!(sel.stepped(1).piece_index, 1);
        assert_eq!(sel.stepped(3).piece_index, 0);
        assert!(Selection::new(collection("a", 3), 3).is_none());
    }
}
