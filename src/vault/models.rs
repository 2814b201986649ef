//! Data models for vault notes

use serde::{Deserialize, Serialize};

/// A note as handed over by the note storage layer.
///
/// The study pipeline never mutates notes; cards and progress keys are
/// derived from `id`, so it must be stable across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Path relative to the vault root, `/`-separated
    pub path: String,
    pub content: String,
}

impl Note {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: path.into(),
            content: content.into(),
        }
    }
}
