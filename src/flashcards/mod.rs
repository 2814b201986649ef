//! Flashcard and spaced repetition system for Recall
//!
//! This module provides:
//! - Card extraction from note text (Q/A, definition, cloze)
//! - SM-2 spaced repetition algorithm and due-card selection
//! - Progress store persisted as an opaque blob
//! - Study sessions and CSV deck export

pub mod algorithm;
pub mod export;
pub mod extract;
pub mod models;
pub mod progress;
pub mod session;

pub use algorithm::{Grade, ScheduleError};
pub use export::{CardFilter, ExportError};
pub use extract::{extract_cards, extract_cards_from_vault, extract_cards_with, ExtractOptions};
pub use models::*;
pub use progress::{
    FileProgressBackend, MemoryProgressBackend, ProgressBackend, ProgressError, ProgressStore,
};
pub use session::StudySession;
