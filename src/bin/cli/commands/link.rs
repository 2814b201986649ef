use anyhow::{bail, Context, Result};

use recall_lib::vault::link_first_occurrence;

use crate::app::App;

pub fn run(app: &App, note_title: &str, term: &str) -> Result<()> {
    let note = app.find_note(note_title)?;

    let Some(content) = link_first_occurrence(&note.content, term) else {
        bail!("'{}' does not occur in '{}'", term.trim(), note.title);
    };

    let mut updated = note.clone();
    updated.content = content;
    app.vault
        .save_note(&updated)
        .with_context(|| format!("Failed to save {}", updated.path))?;

    println!("Linked [[{}]] in {}", term.trim(), updated.path);
    Ok(())
}
