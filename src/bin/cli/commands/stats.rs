use anyhow::Result;

use crate::app::{now_ms, App};
use crate::OutputFormat;

pub async fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let session = app.open_session().await;
    let stats = session.stats(&app.cards, now_ms());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Notes     {}", app.notes.len());
            println!("Cards     {}", stats.total_cards);
            println!("  new     {}", stats.new_cards);
            println!("  learning {}", stats.learning_cards);
            println!("  mature  {}", stats.mature_cards);
            println!("Due now   {}", stats.due_cards);
        }
    }

    Ok(())
}
