use anyhow::Result;

use recall_lib::flashcards::{CardFilter, CardType};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    card_type: Option<CardType>,
    query: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let cards = CardFilter { card_type, query }.apply(&app.cards);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards found.");
                return Ok(());
            }

            for card in &cards {
                println!("{}\n", terminal::render_card(card, use_color));
            }
            println!("{} cards from {} notes", cards.len(), app.notes.len());
        }
    }

    Ok(())
}
