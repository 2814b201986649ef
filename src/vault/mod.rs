//! Vault module for Recall
//!
//! This module provides:
//! - The read-only note model handed over by note storage
//! - Wiki-link parsing and title slugs
//! - Backlink index and resolved link graph
//! - A markdown-folder note loader

mod backlinks;
mod graph;
mod models;
mod storage;
mod wikilink;

pub use backlinks::{build_backlinks, BacklinkIndex};
pub use graph::{build_link_graph, LinkEdge, LinkGraph};
pub use models::Note;
pub use storage::{VaultError, VaultStorage};
pub use wikilink::{extract_wikilinks, link_first_occurrence, slugify, Wikilink, Wikilinks};
