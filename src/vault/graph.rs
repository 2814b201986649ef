//! Resolved link graph between notes

use std::collections::HashMap;

use serde::Serialize;

use super::models::Note;
use super::wikilink::{extract_wikilinks, slugify};

/// A link from one note to another, both by note id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEdge {
    pub from: String,
    pub to: String,
}

/// Notes plus the links that resolve to another note in the set
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<LinkEdge>,
}

/// Build the link graph.
///
/// A link resolves when its slugified target equals a note's slugified
/// title. Unresolved links and self-links produce no edge; every other
/// link occurrence produces one.
pub fn build_link_graph(notes: &[Note]) -> LinkGraph {
    let mut id_by_slug: HashMap<String, &str> = HashMap::new();
    for note in notes {
        // Later notes win on slug collisions
        id_by_slug.insert(slugify(&note.title), &note.id);
    }

    let mut edges = Vec::new();
    for note in notes {
        for link in extract_wikilinks(&note.content) {
            if let Some(target_id) = id_by_slug.get(&slugify(&link.target)) {
                if *target_id != note.id {
                    edges.push(LinkEdge {
                        from: note.id.clone(),
                        to: target_id.to_string(),
                    });
                }
            }
        }
    }

    LinkGraph {
        nodes: notes.iter().map(|n| n.id.clone()).collect(),
        edges,
    }
}
