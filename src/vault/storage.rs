//! Markdown folder note loader
//!
//! Vault layout:
//! ```text
//! {vault}/
//! ├── Cell.md              # id "cell", title "Cell"
//! └── biology/
//!     └── Membrane.md      # id "biologymembrane", title "Membrane"
//! ```
//! Hidden files and folders (including `.obsidian/`) are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use super::models::Note;
use super::wikilink::slugify;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vault not found: {0}")]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, VaultError>;

/// Reads and writes notes stored as `.md` files under a root folder
pub struct VaultStorage {
    root: PathBuf,
}

impl VaultStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Load every markdown note, sorted by relative path
    pub fn load_notes(&self) -> Result<Vec<Note>> {
        if !self.root.is_dir() {
            return Err(VaultError::NotFound(self.root.clone()));
        }

        let mut notes = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable vault entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);

            if is_hidden(relative) || !entry.file_type().is_file() || !is_markdown(path) {
                continue;
            }

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Skipping unreadable note {:?}: {}", path, e);
                    continue;
                }
            };

            notes.push(note_from_file(relative, content));
        }

        notes.sort_by(|a, b| a.path.cmp(&b.path));
        log::info!("Loaded {} notes from {:?}", notes.len(), self.root);
        Ok(notes)
    }

    /// Write a note's content back to its path
    pub fn save_note(&self, note: &Note) -> Result<()> {
        let path = self.root.join(&note.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &note.content)?;
        log::info!("Saved note {} to {:?}", note.id, path);
        Ok(())
    }
}

fn is_hidden(relative: &Path) -> bool {
    relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn note_from_file(relative: &Path, content: String) -> Note {
    let path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/");
    let title = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    // Only called for `.md` files, so the last three bytes are the extension
    let id = slugify(&path[..path.len().saturating_sub(3)]);

    Note {
        id,
        title,
        path,
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_notes_recursively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Cell.md"), "# Cell\n").unwrap();
        fs::create_dir_all(dir.path().join("biology")).unwrap();
        fs::write(dir.path().join("biology/Membrane.MD"), "[[Cell]]").unwrap();
        fs::write(dir.path().join("image.png"), [0u8, 1, 2]).unwrap();
        fs::create_dir_all(dir.path().join(".obsidian")).unwrap();
        fs::write(dir.path().join(".obsidian/workspace.md"), "hidden").unwrap();

        let notes = VaultStorage::new(dir.path().to_path_buf()).load_notes().unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].path, "Cell.md");
        assert_eq!(notes[0].id, "cell");
        assert_eq!(notes[0].title, "Cell");
        assert_eq!(notes[1].path, "biology/Membrane.MD");
        assert_eq!(notes[1].id, "biologymembrane");
        assert_eq!(notes[1].title, "Membrane");
        assert_eq!(notes[1].content, "[[Cell]]");
    }

    #[test]
    fn test_unreadable_note_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Good.md"), "fine").unwrap();
        fs::write(dir.path().join("Bad.md"), [0xffu8, 0xfe, 0xfd]).unwrap();

        let notes = VaultStorage::new(dir.path().to_path_buf()).load_notes().unwrap();

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].path, "Good.md");
    }

    #[test]
    fn test_missing_vault_is_an_error() {
        let dir = TempDir::new().unwrap();
        let storage = VaultStorage::new(dir.path().join("nope"));
        assert!(matches!(storage.load_notes(), Err(VaultError::NotFound(_))));
    }

    #[test]
    fn test_save_note_round_trips() {
        let dir = TempDir::new().unwrap();
        let storage = VaultStorage::new(dir.path().to_path_buf());
        let note = Note::new("deepcell", "Cell", "deep/Cell.md", "See [[Membrane]]");

        storage.save_note(&note).unwrap();
        let notes = storage.load_notes().unwrap();

        assert_eq!(notes, vec![Note::new("deepcell", "Cell", "deep/Cell.md", "See [[Membrane]]")]);
    }
}
