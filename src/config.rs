//! Configuration for Recall
//!
//! Read from TOML; every key is optional:
//! ```toml
//! vault_path = "~/notes"
//! progress_path = "~/.local/share/recall/progress.json"
//! cloze_context_chars = 80
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::extract::{ExtractOptions, DEFAULT_CLOZE_CONTEXT_CHARS};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Folder of markdown notes
    pub vault_path: PathBuf,
    /// Progress blob location; defaults to the local data directory
    pub progress_path: Option<PathBuf>,
    /// Characters of context on each side of a cloze term
    pub cloze_context_chars: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            vault_path: PathBuf::from("."),
            progress_path: None,
            cloze_context_chars: DEFAULT_CLOZE_CONTEXT_CHARS,
        }
    }
}

impl StudyConfig {
    /// `<config dir>/recall/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("recall").join("config.toml"))
    }

    /// `<local data dir>/recall/progress.json`
    pub fn default_progress_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("recall").join("progress.json"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load an explicit file, else the default file if it exists, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => {
                log::debug!("Loading config from {:?}", default);
                Self::load_from_file(&default)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn progress_path(&self) -> Result<PathBuf> {
        match &self.progress_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_progress_path(),
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            cloze_context_chars: self.cloze_context_chars,
        }
    }
}
