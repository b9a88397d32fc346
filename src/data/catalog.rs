//! Catalog Store: the immutable, session-long list of collections.

use itertools::Itertools;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Chain, Collection, GalleryError};
use crate::utils::slugify;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Which chains the timeline shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainFilter {
    #[default]
    All,
    Only(Chain),
}

impl ChainFilter {
    pub fn matches(&self, collection: &Collection) -> bool {
        match self {
            ChainFilter::All => true,
            ChainFilter::Only(chain) => collection.chain_kind() == Some(*chain),
        }
    }
}

/// One row of the side timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub id: String,
    pub title: String,
    pub chain: String,
    pub badge: String,
    pub count_label: String,
}

/// Entries filed under one year heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineYear {
    pub year: i64,
    pub entries: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    collections: Vec<Arc<Collection>>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Normalise raw entries into the store.
    ///
    /// - missing ids are derived from the title; entries with neither are dropped
    /// - later duplicates of an id are dropped, the first one wins
    /// - collections with only a hero image get a representative piece
    pub fn new(raw: Vec<Collection>) -> Self {
        let mut collections = Vec::with_capacity(raw.len());
        let mut by_id = HashMap::with_capacity(raw.len());

        for mut collection in raw {
            if collection.id.trim().is_empty() {
                collection.id = slugify(&collection.title);
            }
            if collection.id.is_empty() {
                log::warn!("Dropping catalog entry without id or title");
                continue;
            }
            if by_id.contains_key(&collection.id) {
                log::warn!("Dropping duplicate catalog entry '{}'", collection.id);
                continue;
            }

            if collection.synthesise_representative() {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_catalog_loading {
                    log::info!("[catalog] '{}' uses its hero as representative piece", collection.id);
                }
            }

            by_id.insert(collection.id.clone(), collections.len());
            collections.push(Arc::new(collection));
        }

        Self { collections, by_id }
    }

    pub fn collections(&self) -> &[Arc<Collection>] {
        &self.collections
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Collection>> {
        self.by_id.get(id).map(|&idx| &self.collections[idx])
    }

    pub fn require(&self, id: &str) -> Result<&Arc<Collection>, GalleryError> {
        self.get(id)
            .ok_or_else(|| GalleryError::UnknownCollection(id.to_string()))
    }

    /// Collections with at least one piece.
    pub fn eligible(&self) -> Vec<Arc<Collection>> {
        self.collections
            .iter()
            .filter(|c| c.has_pieces())
            .cloned()
            .collect()
    }

    /// Timeline grouped by year, newest first; catalog order is kept within a year.
    pub fn timeline(&self, filter: ChainFilter) -> Vec<TimelineYear> {
        let sorted = self
            .collections
            .iter()
            .filter(|c| filter.matches(c))
            .sorted_by(|a, b| b.year_or_default().cmp(&a.year_or_default()));

        let by_year = sorted.chunk_by(|c| c.year_or_default());
        let timeline: Vec<TimelineYear> = by_year
            .into_iter()
            .map(|(year, group)| TimelineYear {
                year,
                entries: group
                    .map(|c| TimelineEntry {
                        id: c.id.clone(),
                        title: c.title.clone(),
                        chain: c.chain.clone(),
                        badge: c.chain_badge(),
                        count_label: c.count_label(),
                    })
                    .collect(),
            })
            .collect();
        timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Piece;

    fn collection(id: &str, year: Option<i64>, chain: &str) -> Collection {
        Collection {
            id: id.to_string(),
            title: id.to_uppercase(),
            year,
            chain: chain.to_string(),
            hero_image: Some(format!("https://media.example/{id}.png")),
            ..Default::default()
        }
    }

    #[test]
    fn duplicates_are_dropped_first_wins() {
        let mut second = collection("a", Some(2020), "tezos");
        second.title = "Second".into();
        let catalog = Catalog::new(vec![collection("a", Some(2024), "ethereum"), second]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().title, "A");
    }

    #[test]
    fn missing_ids_are_slugified_from_titles() {
        let raw = Collection {
            title: "Glitch Bomb".into(),
            ..Default::default()
        };
        let catalog = Catalog::new(vec![raw, Collection::default()]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("glitch-bomb").is_some());
    }

    #[test]
    fn hero_only_collections_become_eligible() {
        let mut bare = collection("bare", None, "ethereum");
        bare.hero_image = None;
        let with_pieces = Collection {
            pieces: vec![Piece {
                token_id: "1".into(),
                ..Default::default()
            }],
            ..collection("full", None, "ethereum")
        };
        let catalog = Catalog::new(vec![collection("hero", None, "tezos"), bare, with_pieces]);
        let eligible: Vec<_> = catalog.eligible().iter().map(|c| c.id.clone()).collect();
        assert_eq!(eligible, vec!["hero".to_string(), "full".to_string()]);
        assert!(matches!(
            catalog.require("nope"),
            Err(GalleryError::UnknownCollection(_))
        ));
    }

    #[test]
    fn timeline_groups_by_year_descending() {
        let catalog = Catalog::new(vec![
            collection("old", Some(2021), "tezos"),
            collection("undated", None, "ordinals"),
            collection("new", Some(2026), "ethereum"),
            collection("also-old", Some(2021), "polygon"),
        ]);
        let timeline = catalog.timeline(ChainFilter::All);
        let years: Vec<i64> = timeline.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2026, 2024, 2021]);

        let old: Vec<&str> = timeline[2].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(old, vec!["old", "also-old"]);
        assert_eq!(timeline[2].entries[1].badge, "POLYGON");
        assert_eq!(timeline[1].entries[0].badge, "BTC");
    }

    #[test]
    fn chain_filter_narrows_timeline() {
        let catalog = Catalog::new(vec![
            collection("t1", Some(2021), "tezos"),
            collection("e1", Some(2024), "ethereum"),
            collection("t2", Some(2022), "tezos"),
        ]);
        let timeline = catalog.timeline(ChainFilter::Only(Chain::Tezos));
        let ids: Vec<&str> = timeline
            .iter()
            .flat_map(|y| y.entries.iter().map(|e| e.id.as_str()))
            .collect();
        assert_eq!(ids, vec!["t2", "t1"]);
        assert_eq!(catalog.len(), 3);
    }
}
