use anyhow::Result;

use recall_lib::flashcards::algorithm::{format_interval, preview_intervals};
use recall_lib::flashcards::Grade;

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, card_id: &str, format: &OutputFormat) -> Result<()> {
    let card = app.find_card(card_id)?;
    let session = app.open_session().await;
    let intervals = preview_intervals(&session.state(&card.id));

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = Grade::ALL
                .iter()
                .zip(intervals)
                .map(|(grade, interval_ms)| {
                    serde_json::json!({
                        "grade": grade.value(),
                        "label": grade.label(),
                        "intervalMs": interval_ms,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (grade, interval_ms) in Grade::ALL.iter().zip(intervals) {
                println!("{} {:<5} {}", grade.value(), grade.label(), format_interval(interval_ms));
            }
        }
    }

    Ok(())
}
