use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

use recall_lib::flashcards::export::write_csv;
use recall_lib::flashcards::{CardFilter, CardType};

use crate::app::App;

pub fn run(
    app: &App,
    card_type: Option<CardType>,
    query: Option<String>,
    out: Option<&Path>,
) -> Result<()> {
    let cards = CardFilter { card_type, query }.apply(&app.cards);

    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(&cards, BufWriter::new(file))?;
            eprintln!("Exported {} cards to {}", cards.len(), path.display());
        }
        None => {
            write_csv(&cards, std::io::stdout().lock())?;
        }
    }

    Ok(())
}
