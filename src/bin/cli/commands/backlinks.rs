use anyhow::Result;

use recall_lib::vault::{build_backlinks, slugify};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, title: &str, format: &OutputFormat) -> Result<()> {
    let backlinks = build_backlinks(&app.notes);
    let incoming = backlinks.incoming(title);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "slug": slugify(title),
                "noteIds": incoming,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if incoming.is_empty() {
                println!("No notes link to '{}'.", title);
                return Ok(());
            }

            for id in incoming {
                match app.note_by_id(id) {
                    Some(note) => println!("{} ({})", note.title, note.path),
                    None => println!("{}", id),
                }
            }
        }
    }

    Ok(())
}
