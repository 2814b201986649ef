//! Recall: study cards from a markdown vault
//!
//! Notes go in, cards come out: wiki-links are parsed into a backlink
//! index and cloze cards, `Q:`/`A:` pairs and heading definitions become
//! cards too, and an SM-2 scheduler decides which cards are due.

pub mod config;
pub mod flashcards;
pub mod vault;
