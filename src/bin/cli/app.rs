use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{TimeZone, Utc};

use recall_lib::config::StudyConfig;
use recall_lib::flashcards::{
    extract_cards_from_vault, Card, FileProgressBackend, StudySession,
};
use recall_lib::vault::{Note, VaultStorage};

/// Shared application state for CLI commands
pub struct App {
    pub config: StudyConfig,
    pub vault: VaultStorage,
    pub notes: Vec<Note>,
    pub cards: Vec<Card>,
    pub progress_path: PathBuf,
}

impl App {
    /// Load config, notes and cards; CLI paths override the config
    pub fn new(
        config_path: Option<&Path>,
        vault_override: Option<PathBuf>,
        progress_override: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = StudyConfig::load(config_path).context("Failed to load config")?;
        if let Some(vault) = vault_override {
            config.vault_path = vault;
        }
        if let Some(progress) = progress_override {
            config.progress_path = Some(progress);
        }

        let progress_path = config
            .progress_path()
            .context("Failed to resolve progress file location")?;

        let vault = VaultStorage::new(config.vault_path.clone());
        let notes = vault
            .load_notes()
            .with_context(|| format!("Failed to load notes from {}", config.vault_path.display()))?;
        let cards = extract_cards_from_vault(&notes, &config.extract_options());

        Ok(Self {
            config,
            vault,
            notes,
            cards,
            progress_path,
        })
    }

    /// Open a study session backed by the progress file
    pub async fn open_session(&self) -> StudySession<FileProgressBackend> {
        StudySession::open(FileProgressBackend::new(self.progress_path.clone())).await
    }

    /// Find a note by title (case-insensitive prefix match)
    pub fn find_note(&self, title: &str) -> Result<&Note> {
        let title_lower = title.to_lowercase();

        // Exact match first
        if let Some(note) = self.notes.iter().find(|n| n.title.to_lowercase() == title_lower) {
            return Ok(note);
        }

        let matches: Vec<&Note> = self
            .notes
            .iter()
            .filter(|n| n.title.to_lowercase().starts_with(&title_lower))
            .collect();

        match matches.len() {
            0 => bail!("No note matching '{}'", title),
            1 => Ok(matches[0]),
            _ => bail!(
                "Ambiguous note title '{}'. Matches:\n{}",
                title,
                matches.iter().map(|n| format!("  - {} ({})", n.title, n.path)).collect::<Vec<_>>().join("\n")
            ),
        }
    }

    /// Find a card by id or unique id prefix
    pub fn find_card(&self, id: &str) -> Result<&Card> {
        if let Some(card) = self.cards.iter().find(|c| c.id == id) {
            return Ok(card);
        }

        let matches: Vec<&Card> = self.cards.iter().filter(|c| c.id.starts_with(id)).collect();

        match matches.len() {
            0 => bail!("No card with id '{}'", id),
            1 => Ok(matches[0]),
            _ => bail!(
                "Ambiguous card id '{}'. Matches:\n{}",
                id,
                matches.iter().map(|c| format!("  - {}", c.id)).collect::<Vec<_>>().join("\n")
            ),
        }
    }

    pub fn note_by_id(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }
}

/// Current time in epoch milliseconds
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render an epoch-millisecond timestamp as UTC
pub fn format_timestamp(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}
