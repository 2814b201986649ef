//! Backlink index
//!
//! Recomputed from the note set on every call; there is no persisted index.

use std::collections::HashMap;

use super::models::Note;
use super::wikilink::{extract_wikilinks, slugify};

/// Reverse link index: slugified target -> ids of notes linking to it.
///
/// Keys iterate in the order they were first seen; each id list keeps the
/// order in which linking notes were visited and holds no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BacklinkIndex {
    keys: Vec<String>,
    entries: HashMap<String, Vec<String>>,
}

impl BacklinkIndex {
    fn insert(&mut self, key: String, note_id: &str) {
        match self.entries.get_mut(&key) {
            Some(ids) => {
                if !ids.iter().any(|id| id == note_id) {
                    ids.push(note_id.to_string());
                }
            }
            None => {
                self.keys.push(key.clone());
                self.entries.insert(key, vec![note_id.to_string()]);
            }
        }
    }

    /// Ids linking to an already-slugified key
    pub fn get(&self, slug: &str) -> &[String] {
        self.entries.get(slug).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of notes linking to `title`, matched by slug
    pub fn incoming(&self, title: &str) -> &[String] {
        self.get(&slugify(title))
    }

    /// Entries in first-seen key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.keys
            .iter()
            .map(move |key| (key.as_str(), self.get(key)))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Build the backlink index for a note collection
pub fn build_backlinks(notes: &[Note]) -> BacklinkIndex {
    let mut index = BacklinkIndex::default();
    for note in notes {
        for link in extract_wikilinks(&note.content) {
            index.insert(slugify(&link.target), &note.id);
        }
    }
    index
}
