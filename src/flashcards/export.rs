//! Card filtering and CSV deck export
//!
//! Export columns: `front,back,type,tags,sourcePath,noteId`. Every field is
//! quoted and embedded quotes are doubled; tags are joined with `;`.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use super::models::{Card, CardType};

const HEADER: &str = "front,back,type,tags,sourcePath,noteId";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Selects cards by type and by a case-insensitive text query
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub card_type: Option<CardType>,
    pub query: Option<String>,
}

impl CardFilter {
    pub fn matches(&self, card: &Card) -> bool {
        if let Some(card_type) = self.card_type {
            if card.card_type != card_type {
                return false;
            }
        }

        let query = self
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .unwrap_or_default();
        if query.is_empty() {
            return true;
        }

        card.front.to_lowercase().contains(&query) || card.back.to_lowercase().contains(&query)
    }

    pub fn apply<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        cards.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Write cards as CSV to `writer`
pub fn write_csv<W: Write>(cards: &[&Card], mut writer: W) -> Result<()> {
    writeln!(writer, "{}", HEADER)?;

    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for card in cards {
        let source = card.first_source();
        csv_writer.write_record([
            card.front.as_str(),
            card.back.as_str(),
            card.card_type.as_str(),
            card.tags.join(";").as_str(),
            source.map(|s| s.path.as_str()).unwrap_or(""),
            source.map(|s| s.note_id.as_str()).unwrap_or(""),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render cards as a CSV string
pub fn cards_to_csv(cards: &[&Card]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(cards, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
