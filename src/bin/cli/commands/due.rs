use anyhow::Result;

use crate::app::{now_ms, App};
use crate::render::terminal;
use crate::OutputFormat;

pub async fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = app.open_session().await;
    let queue = session.due_queue(&app.cards, now_ms());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&queue)?);
        }
        OutputFormat::Plain => {
            if queue.is_empty() {
                println!("No cards due.");
                return Ok(());
            }

            for due in &queue {
                println!("{}\n", terminal::render_card(due.card, use_color));
            }
            println!("Due: {}", queue.len());
        }
    }

    Ok(())
}
