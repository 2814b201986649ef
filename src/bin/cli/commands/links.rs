use anyhow::Result;

use recall_lib::vault::{extract_wikilinks, Wikilink};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, note_title: &str, format: &OutputFormat) -> Result<()> {
    let note = app.find_note(note_title)?;
    let links: Vec<Wikilink> = extract_wikilinks(&note.content).collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&links)?);
        }
        OutputFormat::Plain => {
            if links.is_empty() {
                println!("No links in '{}'.", note.title);
                return Ok(());
            }

            for link in &links {
                match &link.alias {
                    Some(alias) => println!("{:>6}  {} ({})", link.index, link.target, alias),
                    None => println!("{:>6}  {}", link.index, link.target),
                }
            }
        }
    }

    Ok(())
}
