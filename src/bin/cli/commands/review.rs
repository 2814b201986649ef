use anyhow::{Context, Result};

use recall_lib::flashcards::algorithm::format_interval;
use recall_lib::flashcards::Grade;

use crate::app::{format_timestamp, now_ms, App};
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub async fn run(
    app: &App,
    card_id: &str,
    rating: i32,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let grade = Grade::try_from(rating)?;
    let card = app.find_card(card_id)?;

    let mut session = app.open_session().await;
    let state = session
        .grade(&card.id, grade, now_ms())
        .await
        .with_context(|| format!("Failed to save progress to {}", app.progress_path.display()))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "cardId": card.id,
                "grade": grade.value(),
                "state": state,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let label = if use_color {
                format!("{}{}{}", Color::BOLD, grade.label(), Color::RESET)
            } else {
                grade.label().to_string()
            };
            println!("{}", terminal::one_line(&card.front));
            println!(
                "{} -> next review in {} ({}), ease {:.2}, streak {}",
                label,
                format_interval(state.interval_ms),
                format_timestamp(state.due_at),
                state.ease_factor,
                state.repetitions
            );
        }
    }

    Ok(())
}
